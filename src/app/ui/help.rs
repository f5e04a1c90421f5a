use std::fmt::Display;

use once_cell::sync::Lazy;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Cell, Clear, Padding, Row, Table},
};
use ratatui_macros::span;
use tui_textarea::Key;

static KEY_BINDINGS: Lazy<Vec<KeyBinding>> = Lazy::new(build_key_bindings);

#[derive(Default)]
pub struct HelpScreen {
    showing: bool,
}

impl HelpScreen {
    pub fn new() -> HelpScreen {
        HelpScreen::default()
    }

    pub fn showing(&self) -> bool {
        self.showing
    }

    pub fn toggle_showing(&mut self) {
        self.showing = !self.showing;
    }

    pub fn close(&mut self) {
        self.showing = false;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.showing {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .padding(Padding::symmetric(1, 0))
            .title(Line::from(" Help ").bold())
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(vec![
                " ".into(),
                span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Esc/F1"),
                " to close ".into(),
            ]));

        let rows = KEY_BINDINGS
            .iter()
            .map(|b| Row::new(vec![Cell::from(b.key.to_string()), Cell::from(b.description)]))
            .collect::<Vec<_>>();

        frame.render_widget(Clear, area);
        frame.render_widget(
            Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)]).block(block),
            area,
        );
    }

    pub fn render_help_line(&self, frame: &mut Frame, area: Rect) {
        let mut instructions = KEY_BINDINGS
            .iter()
            .filter_map(|b| b.short.map(|short| (b.key.to_string(), short)))
            .flat_map(|(key, short)| {
                vec![
                    span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); key),
                    " ".into(),
                    span!(Style::default().fg(Color::White); short),
                    " | ".into(),
                ]
            })
            .collect::<Vec<_>>();
        instructions.pop();

        frame.render_widget(Line::from(instructions), area);
    }
}

struct KeyBinding {
    key: Input,
    description: &'static str,
    short: Option<&'static str>,
}

impl KeyBinding {
    fn new(key: Input, description: &'static str) -> Self {
        Self {
            key,
            description,
            short: None,
        }
    }

    fn with_short(mut self, short: &'static str) -> Self {
        self.short = Some(short);
        self
    }
}

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new(Input::new(Key::F(1)), "Show help").with_short("Help"),
        KeyBinding::new(Input::new(Key::Char('q')).ctrl(), "Quit").with_short("Quit"),
        KeyBinding::new(Input::new(Key::Tab), "Switch focus between sidebar and input")
            .with_short("Focus"),
        KeyBinding::new(Input::new(Key::Right).alt(), "Next tab"),
        KeyBinding::new(Input::new(Key::Left).alt(), "Previous tab"),
        KeyBinding::new(Input::new(Key::Char('n')).ctrl(), "New chat").with_short("New"),
        KeyBinding::new(Input::new(Key::Char('e')).ctrl(), "More context for the latest reply")
            .with_short("More"),
        KeyBinding::new(Input::new(Key::Char('b')).ctrl(), "Collapse or expand the sidebar"),
        KeyBinding::new(Input::new(Key::Char('r')).ctrl(), "Refresh conversations"),
        KeyBinding::new(Input::new(Key::Char('o')).ctrl(), "Log out"),
        KeyBinding::new(Input::new(Key::Char('d')), "Delete conversation (sidebar)"),
        KeyBinding::new(Input::new(Key::Enter), "Send message / open conversation"),
        KeyBinding::new(Input::new(Key::Enter).alt(), "New line"),
        KeyBinding::new(Input::new(Key::Up), "Scroll up / move up"),
        KeyBinding::new(Input::new(Key::Down), "Scroll down / move down"),
        KeyBinding::new(Input::new(Key::Char('u')).ctrl(), "Scroll page up"),
        KeyBinding::new(Input::new(Key::Char('d')).ctrl(), "Scroll page down"),
    ]
}

struct Input {
    key: Key,
    ctrl: bool,
    alt: bool,
}

impl Input {
    fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
        }
    }

    fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    fn alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{c}"),
            Key::F(n) => write!(f, "F{n}"),
            Key::Enter => write!(f, "Enter"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Tab => write!(f, "Tab"),
            Key::Esc => write!(f, "Esc"),
            _ => write!(f, "?"),
        }
    }
}
