use std::io;

use crate::config::{Configuration, constants::UNDER_CONSTRUCTION};
use crate::info_notice;
use crate::models::{Action, AuthContext, Event, User};
use crate::session::{Route, resolve_route};
use crate::state::{Dashboard, Input, Intent, SidebarEntry};
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::Result;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    prelude::{Backend, CrosstermBackend},
    style::Stylize,
    text::{Line, Span, Text},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation},
};
use ratatui_macros::span;
use syntect::highlighting::Theme;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::app::login::LoginScreen;
use crate::app::ui::{
    BubbleList, Dim, HelpScreen, Loading, Notice, Question, Scroll, TextArea, details, header,
    sidebar, utils,
};

use super::services::EventService;

const MIN_WIDTH: u16 = 80;
const MAX_DETAILS_HEIGHT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Sidebar,
    Input,
}

pub struct App<'a> {
    action_tx: mpsc::UnboundedSender<Action>,

    events: &'a mut EventService,

    route: Route,
    user: Option<User>,
    login: LoginScreen<'a>,

    dashboard: Dashboard,
    focus: Focus,
    input: tui_textarea::TextArea<'a>,
    bubble_list: BubbleList<'a>,
    scroll: Scroll,
    last_revision: u64,
    last_known_width: usize,
    last_known_height: usize,

    help_screen: HelpScreen,
    question: Question<'a, Intent>,
    notice: Notice,
    loading: Loading<'a>,
    transcript_loading: Loading<'a>,

    cancel_token: CancellationToken,
}

impl<'a> App<'a> {
    pub fn new(
        theme: Theme,
        action_tx: mpsc::UnboundedSender<Action>,
        events: &'a mut EventService,
        cancel_token: CancellationToken,
        session: Option<AuthContext>,
    ) -> App<'a> {
        let theme = Box::leak(Box::new(theme));
        let config = Configuration::instance();

        App {
            action_tx,
            events,
            route: resolve_route(session.as_ref()),
            user: session.map(|ctx| ctx.user().clone()),
            login: LoginScreen::new(),
            dashboard: Dashboard::from_config(config),
            focus: Focus::Input,
            input: TextArea::default().build(),
            bubble_list: BubbleList::new(theme).with_timestamps(config.general.show_timestamps),
            scroll: Scroll::default(),
            last_revision: 0,
            last_known_width: 0,
            last_known_height: 0,
            help_screen: HelpScreen::new(),
            question: Question::default().with_title(span!(" Confirm ").bold()),
            notice: Notice::default(),
            loading: Loading::new(vec![
                span!("ResQ AI is thinking... ").gray(),
                span!("please wait").green().bold(),
            ]),
            transcript_loading: Loading::new(span!("Loading conversation...").gray()),
            cancel_token,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        enable_raw_mode()?;
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        let term_backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(term_backend)?;

        if self.route == Route::Dashboard {
            self.apply(Input::User(Intent::Refresh));
        }
        let result = self.start_loop(&mut terminal).await;

        self.cancel_token.cancel();

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;

        terminal.show_cursor()?;
        result
    }

    async fn start_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.render(terminal)?;
            let event = self.events.next().await;
            if self.handle_event(event) {
                return Ok(());
            }
        }
    }

    /// Returns true when the app should stop.
    fn handle_event(&mut self, event: Event) -> bool {
        if let Some(stop) = self.handle_global_event(&event) {
            return stop;
        }

        match self.route {
            Route::Login => self.handle_login_event(event),
            Route::Dashboard => self.handle_dashboard_event(event),
        }
        false
    }

    fn handle_global_event(&mut self, event: &Event) -> Option<bool> {
        match event {
            Event::Quit => Some(true),

            Event::UiTick => {
                self.loading.tick();
                self.transcript_loading.tick();
                Some(false)
            }

            Event::Notice(msg) => {
                self.notice.add_message(msg.clone());
                Some(false)
            }

            Event::LoginSucceeded(ctx) => {
                let user = ctx.user().clone();
                self.notice
                    .add_message(info_notice!(format!("Welcome, {}", user.display_name())));
                self.user = Some(user);
                self.login.reset();
                self.route = Route::Dashboard;
                self.apply(Input::User(Intent::Refresh));
                Some(false)
            }

            Event::LoginFailed(msg) => {
                self.login.fail();
                self.notice.add_message(msg.clone());
                Some(false)
            }

            Event::LoggedOut => {
                self.reset_dashboard();
                self.user = None;
                self.route = Route::Login;
                Some(false)
            }

            Event::Backend(backend_event) => {
                if self.route == Route::Dashboard {
                    self.apply(Input::Backend(backend_event.clone()));
                } else {
                    log::debug!("dropping backend event while signed out");
                }
                Some(false)
            }

            _ => None,
        }
    }

    fn handle_login_event(&mut self, event: Event) {
        match event {
            Event::KeyboardTab => self.login.focus_next(),
            Event::KeyboardEnter => match self.login.submit() {
                Ok(Some(action)) => self.send(action),
                Ok(None) => {}
                Err(notice) => self.notice.add_message(notice),
            },
            Event::KeyboardCharInput(input) => self.login.input(input),
            Event::KeyboardPaste(text) => self.login.paste(&text),
            _ => {}
        }
    }

    fn handle_dashboard_event(&mut self, event: Event) {
        if self.question.showing() {
            self.handle_question_event(event);
            return;
        }

        if self.help_screen.showing() {
            if matches!(event, Event::KeyboardEsc | Event::KeyboardF1) {
                self.help_screen.close();
            }
            return;
        }

        match event {
            Event::KeyboardF1 => {
                self.help_screen.toggle_showing();
                return;
            }
            Event::NextTab => {
                self.apply(Input::User(Intent::NextTab));
                return;
            }
            Event::PrevTab => {
                self.apply(Input::User(Intent::PrevTab));
                return;
            }
            Event::KeyboardCtrlO => {
                self.send(Action::Logout);
                return;
            }
            _ => {}
        }

        if !self.dashboard.shell.shows_chat() {
            return;
        }

        match event {
            Event::KeyboardCtrlB => self.apply(Input::User(Intent::ToggleSidebar)),
            Event::KeyboardCtrlR => self.apply(Input::User(Intent::Refresh)),
            Event::KeyboardCtrlN => self.apply(Input::User(Intent::NewConversation)),
            Event::KeyboardCtrlE => self.apply(Input::User(Intent::MoreContext)),
            Event::KeyboardCtrlC => self.input = self.input_style().build(),
            Event::KeyboardTab => self.toggle_focus(),
            event => match self.focus {
                Focus::Sidebar => self.handle_sidebar_event(event),
                Focus::Input => self.handle_input_event(event),
            },
        }
    }

    fn handle_question_event(&mut self, event: Event) {
        match event {
            Event::KeyboardCharInput(input) => match input.key {
                tui_textarea::Key::Char('y') | tui_textarea::Key::Char('Y') => {
                    if let Some(intent) = self.question.confirm() {
                        self.apply(Input::User(intent));
                    }
                }
                tui_textarea::Key::Char('n') | tui_textarea::Key::Char('N') => {
                    self.question.close()
                }
                _ => {}
            },
            Event::KeyboardEsc => self.question.close(),
            _ => {}
        }
    }

    fn handle_sidebar_event(&mut self, event: Event) {
        match event {
            Event::UiScrollUp => self.apply(Input::User(Intent::CursorUp)),
            Event::UiScrollDown => self.apply(Input::User(Intent::CursorDown)),

            Event::KeyboardEnter => {
                let intent = match self.dashboard.directory.cursor_entry() {
                    Some(SidebarEntry::NewChat) => Some(Intent::NewConversation),
                    Some(SidebarEntry::Conversation(convo)) => {
                        Some(Intent::SelectConversation(convo.id().to_string()))
                    }
                    Some(SidebarEntry::ClearAll) => {
                        self.question
                            .open("Delete every conversation? This cannot be undone.", Intent::ClearAll);
                        None
                    }
                    None => None,
                };
                if let Some(intent) = intent {
                    self.apply(Input::User(intent));
                }
            }

            Event::KeyboardCharInput(input) if input.key == tui_textarea::Key::Char('d') => {
                if let Some(SidebarEntry::Conversation(convo)) =
                    self.dashboard.directory.cursor_entry()
                {
                    let question = format!("Delete \"{}\"?", convo.title());
                    let intent = Intent::DeleteConversation(convo.id().to_string());
                    self.question.open(question, intent);
                }
            }
            _ => {}
        }
    }

    fn handle_input_event(&mut self, event: Event) {
        match event {
            Event::KeyboardCharInput(input) => {
                if self.dashboard.accepts_input() {
                    self.input.input(input);
                }
            }

            Event::KeyboardPaste(text) => {
                if self.dashboard.accepts_input() {
                    self.input.set_yank_text(text.replace('\r', "\n"));
                    self.input.paste();
                }
            }

            Event::KeyboardAltEnter => {
                if self.dashboard.accepts_input() {
                    self.input.insert_newline();
                }
            }

            Event::KeyboardEnter => self.handle_send(),

            Event::UiScrollDown => self.scroll.down(),
            Event::UiScrollUp => self.scroll.up(),
            Event::UiScrollPageDown => self.scroll.page_down(),
            Event::UiScrollPageUp => self.scroll.page_up(),
            _ => {}
        }
    }

    fn handle_send(&mut self) {
        if self.dashboard.chat.is_sending() {
            self.notice.warning("Waiting for ResQ AI to respond, please wait...");
            return;
        }

        let text = self.input.lines().join("\n");
        if text.trim().is_empty() {
            return;
        }

        self.apply(Input::User(Intent::Send(text)));
        if self.dashboard.chat.is_sending() {
            self.input = self.input_style().build();
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Input,
            Focus::Input => Focus::Sidebar,
        };
        self.input_style().apply(&mut self.input);

        if self.focus == Focus::Input {
            self.apply(Input::User(Intent::InputFocused));
        } else {
            self.follow_focus();
        }
    }

    fn input_style(&self) -> TextArea {
        TextArea::default().with_active(self.focus == Focus::Input)
    }

    /// Feeds the dashboard and forwards whatever it asks for.
    fn apply(&mut self, input: Input) {
        for action in self.dashboard.reduce(input) {
            self.send(action);
        }
        self.follow_focus();
        self.sync_chat();
    }

    fn follow_focus(&mut self) {
        let input_focused = self.route == Route::Dashboard && self.focus == Focus::Input;
        for action in self.dashboard.follow_focus(input_focused) {
            self.send(action);
        }
    }

    fn send(&self, action: Action) {
        if let Err(err) = self.action_tx.send(action) {
            log::error!("Failed to queue action: {}", err);
        }
    }

    fn reset_dashboard(&mut self) {
        self.dashboard = Dashboard::from_config(Configuration::instance());
        self.focus = Focus::Input;
        self.input = self.input_style().build();
        self.question.close();
        self.help_screen.close();
        self.last_revision = 0;
        self.scroll = Scroll::default();
        self.sync_chat();
    }

    fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width.into();
        self.last_known_height = rect.height.into();
        self.sync_chat();
    }

    fn sync_chat(&mut self) {
        self.bubble_list
            .set_messages(self.dashboard.chat.messages(), self.last_known_width);
        self.scroll
            .set_state(self.bubble_list.len(), self.last_known_height);

        let revision = self.dashboard.chat.revision();
        if revision != self.last_revision {
            self.last_revision = revision;
            self.scroll.last();
        }
    }

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|f| {
            let current_width = f.area().width;
            if current_width < MIN_WIDTH {
                f.render_widget(
                    Paragraph::new(utils::split_to_lines(
                        format!(
                            "The window is too narrow, at least {} cells are needed (current: {})",
                            MIN_WIDTH, current_width
                        ),
                        current_width.saturating_sub(2) as usize,
                    ))
                    .alignment(Alignment::Left),
                    f.area(),
                );
                return;
            }

            match self.route {
                Route::Login => self.login.render(f, f.area()),
                Route::Dashboard => self.render_dashboard(f),
            }

            self.notice.render(f, utils::notice_area(f.area(), 30));
        })?;
        Ok(())
    }

    fn render_dashboard(&mut self, f: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        if let Some(user) = &self.user {
            header::render(f, layout[0], &self.dashboard.shell, user);
        }
        self.help_screen.render_help_line(f, layout[2]);

        if self.dashboard.shell.shows_chat() {
            self.render_chat(f, layout[1]);
        } else {
            f.render_widget(
                Paragraph::new(Line::from(UNDER_CONSTRUCTION).gray()).alignment(Alignment::Center),
                layout[1].inner(Margin {
                    vertical: 2,
                    horizontal: 2,
                }),
            );
        }

        if self.help_screen.showing() || self.question.showing() {
            f.dim_bg();
        }
        self.help_screen
            .render(f, utils::popup_area(f.area(), 50, 60));
        self.question.render(f, f.area());
    }

    fn render_chat(&mut self, f: &mut Frame, area: Rect) {
        let [side, main] = Layout::horizontal([
            Constraint::Length(sidebar::width(&self.dashboard.directory)),
            Constraint::Min(1),
        ])
        .areas(area);

        sidebar::render(
            f,
            side,
            &self.dashboard.directory,
            self.focus == Focus::Sidebar,
        );

        let chat = &self.dashboard.chat;
        let details = details::build_lines(chat, main.width.saturating_sub(2) as usize);
        let details_height = details.len().min(MAX_DETAILS_HEIGHT) as u16;
        let input_height = if chat.is_sending() {
            3
        } else {
            (self.input.lines().len() + 2) as u16
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(details_height),
                Constraint::Max(input_height),
            ])
            .split(main);

        f.render_widget(self.title_line(), layout[0]);

        let transcript = layout[1];
        if transcript.width as usize != self.last_known_width
            || transcript.height as usize != self.last_known_height
        {
            self.set_rect(transcript);
        }

        if self.dashboard.chat.is_loading_transcript() {
            self.transcript_loading
                .render(f, centered_row(transcript, 3));
        } else {
            self.bubble_list
                .render(transcript, f.buffer_mut(), self.scroll.position);
        }
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .end_symbol(None)
                .begin_symbol(None),
            transcript.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.scroll.scrollbar_state,
        );

        f.render_widget(
            Paragraph::new(Text::from(details)),
            layout[2].inner(Margin {
                vertical: 0,
                horizontal: 1,
            }),
        );

        if self.dashboard.chat.is_sending() {
            self.loading.render(f, layout[3]);
        } else {
            f.render_widget(&self.input, layout[3]);
        }
    }

    fn title_line(&self) -> Line<'static> {
        let directory = &self.dashboard.directory;
        let title = directory
            .selected()
            .and_then(|id| directory.conversations().iter().find(|c| c.id() == id))
            .map(|c| c.title().to_string())
            .unwrap_or_else(|| "ResQ AI".to_string());

        let mut spans = vec![Span::raw(" "), Span::raw(title).bold()];
        if self.dashboard.chat.is_loading_transcript() {
            spans.push(span!(" (loading…)").gray());
        }
        Line::from(spans)
    }
}

fn centered_row(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect::new(
        area.x,
        area.y + (area.height - height) / 2,
        area.width,
        height,
    )
}
