#[cfg(test)]
#[path = "login_test.rs"]
mod tests;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};
use ratatui_macros::span;
use tui_textarea::Input;

use crate::app::ui::TextArea;
use crate::models::{Action, NoticeMessage, Password};
use crate::warn_notice;

const BOX_WIDTH: u16 = 50;
const BOX_HEIGHT: u16 = 14;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Field {
    #[default]
    Email,
    Password,
}

pub struct LoginScreen<'a> {
    email: tui_textarea::TextArea<'a>,
    password: tui_textarea::TextArea<'a>,
    focus: Field,
    submitting: bool,
}

impl<'a> LoginScreen<'a> {
    pub fn new() -> LoginScreen<'a> {
        let mut screen = LoginScreen {
            email: email_input(true).build(),
            password: password_input(false).build(),
            focus: Field::Email,
            submitting: false,
        };
        screen.restyle();
        screen
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn email(&self) -> String {
        self.email.lines().join("")
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Field::Email => Field::Password,
            Field::Password => Field::Email,
        };
        self.restyle();
    }

    pub fn input(&mut self, input: Input) {
        if self.submitting {
            return;
        }
        self.focused_mut().input(input);
    }

    /// Single-line fields: pasted newlines are dropped.
    pub fn paste(&mut self, text: &str) {
        if self.submitting {
            return;
        }
        let field = self.focused_mut();
        field.set_yank_text(text.replace(['\r', '\n'], ""));
        field.paste();
    }

    /// Builds the login action, or the notice to show when a field is blank.
    /// Nothing is sent while a previous attempt is still pending.
    pub fn submit(&mut self) -> Result<Option<Action>, NoticeMessage> {
        if self.submitting {
            return Ok(None);
        }

        let email = self.email().trim().to_string();
        let password = self.password.lines().join("");
        if email.is_empty() || password.is_empty() {
            return Err(warn_notice!("Please enter both email and password."));
        }

        self.submitting = true;
        Ok(Some(Action::Login {
            email,
            password: Password::new(password),
        }))
    }

    /// The attempt was rejected, the password is cleared for a retry.
    pub fn fail(&mut self) {
        self.submitting = false;
        self.password = password_input(false).build();
        self.focus = Field::Password;
        self.restyle();
    }

    pub fn reset(&mut self) {
        *self = LoginScreen::new();
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let rect = centered(area, BOX_WIDTH, BOX_HEIGHT);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .padding(Padding::new(2, 2, 1, 0))
            .title(Line::from(" ResQ AI ").bold())
            .title_alignment(Alignment::Center);

        let inner = block.inner(rect);
        f.render_widget(Clear, rect);
        f.render_widget(block, rect);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        f.render_widget(
            Paragraph::new(Line::from("Emergency Care Assistant").gray())
                .alignment(Alignment::Center),
            layout[0],
        );
        f.render_widget(&self.email, layout[2]);
        f.render_widget(&self.password, layout[3]);

        let status = if self.submitting {
            Line::from(span!("Signing in...").yellow())
        } else {
            Line::from(vec![
                span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Enter"),
                span!(" sign in | ").white(),
                span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Tab"),
                span!(" switch field | ").white(),
                span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Ctrl+q"),
                span!(" quit").white(),
            ])
        };
        f.render_widget(
            Paragraph::new(status).alignment(Alignment::Center),
            layout[4],
        );
    }

    fn focused_mut(&mut self) -> &mut tui_textarea::TextArea<'a> {
        match self.focus {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    fn restyle(&mut self) {
        email_input(self.focus == Field::Email).apply(&mut self.email);
        password_input(self.focus == Field::Password).apply(&mut self.password);
    }
}

impl Default for LoginScreen<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn email_input(active: bool) -> TextArea {
    TextArea::new(" Email ")
        .with_placeholder("you@hospital.org")
        .with_active(active)
}

fn password_input(active: bool) -> TextArea {
    TextArea::new(" Password ").masked().with_active(active)
}

fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}
