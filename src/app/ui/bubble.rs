use crate::{config::constants::BUBBLE_WIDTH_PERCENT, models::Message};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use syntect::highlighting::Theme;
use unicode_width::UnicodeWidthStr;

use super::utils;

// Left border, left padding, right padding, right border
const BORDER_ELEMENTS_LEN: usize = 4;
const OUTER_PADDING_PERCENTAGE: f32 = 0.04;

const ASSISTANT_COLOR: Color = Color::Rgb(255, 140, 105);
const USER_COLOR: Color = Color::Rgb(64, 224, 208);

/// A rounded box around one message. Assistant bubbles hug the left edge,
/// the user's hug the right.
pub struct Bubble<'m> {
    message: &'m Message,
    text: String,
    max_width: usize,
    show_time: bool,
}

impl<'m> Bubble<'m> {
    pub fn new(message: &'m Message, max_width: usize) -> Bubble<'m> {
        Bubble {
            message,
            text: message.text().replace('\t', "  "),
            max_width,
            show_time: true,
        }
    }

    pub fn with_timestamp(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    /// Lines own their text, so the result outlives the message.
    pub fn as_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let max_line_len = self.max_line_length();
        let lines = utils::build_message_lines(&self.text, max_line_len, theme, |line| {
            self.format_spans(line.spans, max_line_len)
        });
        self.wrap_lines(lines, max_line_len)
    }

    fn time(&self) -> String {
        if !self.show_time {
            return String::new();
        }
        self.message
            .created_at()
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string()
    }

    fn wrap_lines(&self, lines: Vec<Line<'static>>, max_line_len: usize) -> Vec<Line<'static>> {
        let author = self.message.author();
        let top_bar = format!(
            "╭─ {} {}╮",
            author,
            utils::fill("─", max_line_len, &[author.width(), 1])
        );

        let time = self.time();
        let bottom_bar = if time.is_empty() {
            format!("╰{}╯", "─".repeat(max_line_len + 2))
        } else {
            format!(
                "╰─ {} {}╯",
                time,
                utils::fill("─", max_line_len, &[time.width(), 1])
            )
        };

        let outer = utils::fill(" ", self.max_width, &[max_line_len, BORDER_ELEMENTS_LEN]);
        let (top_bar, bottom_bar) = if self.message.is_user() {
            (format!("{outer}{top_bar}"), format!("{outer}{bottom_bar}"))
        } else {
            (top_bar, bottom_bar)
        };

        let mut res = vec![self.highlighted_line(top_bar)];
        res.extend(lines);
        res.push(self.highlighted_line(bottom_bar));
        res
    }

    fn max_line_length(&self) -> usize {
        let min_outer_padding =
            (self.max_width as f32 * OUTER_PADDING_PERCENTAGE).ceil() as usize;
        let available = self
            .max_width
            .saturating_sub(BORDER_ELEMENTS_LEN + min_outer_padding);

        let mut max_line_len = self
            .text
            .lines()
            .map(|line| line.width())
            .max()
            .unwrap_or_default()
            .min(available);

        let limit = (self.max_width * BUBBLE_WIDTH_PERCENT).div_ceil(100);
        max_line_len = max_line_len.min(limit);

        // The author and the time sit inside the border bars
        let author_len = self.message.author().width() + 2;
        let time_len = self.time().width() + 2;
        max_line_len.max(author_len).max(time_len)
    }

    fn format_spans(&self, mut spans: Vec<Span<'static>>, max_line_len: usize) -> Line<'static> {
        let line_len: usize = spans.iter().map(|e| e.content.width()).sum();
        let fill = utils::fill(" ", max_line_len, &[line_len]);

        let mut wrapped = vec![self.highlighted_span("│ ".to_string())];
        wrapped.append(&mut spans);
        wrapped.push(self.highlighted_span(format!("{fill} │")));

        if !self.message.is_user() {
            return Line::from(wrapped);
        }

        let outer = utils::fill(" ", self.max_width, &[max_line_len, BORDER_ELEMENTS_LEN]);
        let mut line = vec![Span::from(outer)];
        line.extend(wrapped);
        Line::from(line)
    }

    fn highlighted_span(&self, text: String) -> Span<'static> {
        let color = if self.message.is_user() {
            USER_COLOR
        } else {
            ASSISTANT_COLOR
        };
        Span::styled(text, Style::default().fg(color))
    }

    fn highlighted_line(&self, text: String) -> Line<'static> {
        Line::from(self.highlighted_span(text))
    }
}
