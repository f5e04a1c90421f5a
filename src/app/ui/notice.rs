use std::time::Duration;

use crate::models::NoticeMessage;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};
use unicode_width::UnicodeWidthStr;

use super::utils;

struct Entry {
    value: NoticeMessage,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Stack of transient notices drawn in the top-right corner.
pub struct Notice {
    notices: Vec<Entry>,
    display_duration: Duration,
}

impl Notice {
    pub fn new(display_duration: Duration) -> Notice {
        Notice {
            notices: vec![],
            display_duration,
        }
    }

    pub fn add_message(&mut self, msg: NoticeMessage) {
        self.notices.push(Entry {
            value: msg,
            created_at: chrono::Utc::now(),
        });
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.add_message(NoticeMessage::info(msg))
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.add_message(NoticeMessage::warning(msg))
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    fn sync(&mut self) {
        let now = chrono::Utc::now();
        let default = self.display_duration;
        self.notices.retain(|entry| {
            let elapsed = now.signed_duration_since(entry.created_at);
            let ttl = entry.value.duration().unwrap_or(default);
            elapsed.num_milliseconds() < ttl.as_millis() as i64
        });
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.sync();
        if self.notices.is_empty() || area.width < 6 || area.height < 3 {
            return;
        }

        let max_width = area.width as usize - 2;
        let max_height = area.height as usize;

        let mut items = vec![];
        let mut height = 0;
        for entry in &self.notices {
            let lines = build_bubble(&entry.value, max_width);
            height += lines.len();
            if height > max_height {
                break;
            }
            items.push(ListItem::new(lines));
        }
        f.render_widget(List::new(items), area);
    }
}

impl Default for Notice {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

fn build_bubble<'a>(notice: &NoticeMessage, max_width: usize) -> Vec<Line<'a>> {
    let border = notice.kind().border_color();
    let text = notice.kind().text_color();

    let inner_width = max_width.saturating_sub(2);
    let body = utils::split_to_lines(notice.message().replace('\n', " "), inner_width)
        .into_iter()
        .map(|line| {
            let content: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            content.trim().to_string()
        })
        .collect::<Vec<_>>();

    let mut lines = vec![colored(format!("╭{}╮", "─".repeat(max_width)), border)];
    for line in body {
        let fill = utils::fill(" ", inner_width, &[line.width()]);
        lines.push(Line::from(vec![
            Span::styled("│ ", Style::default().fg(border)),
            Span::styled(format!("{line}{fill}"), Style::default().fg(text)),
            Span::styled(" │", Style::default().fg(border)),
        ]));
    }
    lines.push(colored(format!("╰{}╯", "─".repeat(max_width)), border));
    lines
}

fn colored<'a>(text: String, color: Color) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().fg(color)))
}
