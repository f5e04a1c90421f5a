use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Padding},
};

/// Builder for the bordered `tui_textarea` inputs used across the app.
pub struct TextArea {
    title: String,
    placeholder: String,
    masked: bool,
    active: bool,
}

impl TextArea {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn build<'a>(&self) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        self.apply(&mut textarea);
        textarea.set_placeholder_text(self.placeholder.clone());
        if self.masked {
            textarea.set_mask_char('•');
        }
        textarea
    }

    /// Restyles an existing text area, keeping its content.
    pub fn apply(&self, textarea: &mut tui_textarea::TextArea<'_>) {
        let border = if self.active {
            Color::LightBlue
        } else {
            Color::DarkGray
        };
        textarea.set_block(
            Block::default()
                .title(self.title.clone())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .title_alignment(Alignment::Left)
                .padding(Padding::new(1, 1, 0, 0)),
        );
        textarea.set_cursor_line_style(Style::default());
        if self.active {
            textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        } else {
            textarea.set_cursor_style(Style::default());
        }
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self {
            title: " Message ".to_string(),
            placeholder: "Ask about your uploaded protocols, drug dosages, procedures...".to_string(),
            masked: false,
            active: true,
        }
    }
}
