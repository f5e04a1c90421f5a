#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::{collections::BTreeMap, sync::Arc};

use crate::models::Message;
use ratatui::{buffer::Buffer, layout::Rect, text::Line};
use syntect::highlighting::Theme;

use super::bubble::Bubble;

struct CacheEntry {
    message_id: String,
    lines: Vec<Arc<Line<'static>>>,
}

/// Rendered transcript. Bubbles are cached per position and rebuilt only
/// when the message at that position or the width changes.
pub struct BubbleList<'a> {
    theme: &'a Theme,
    show_time: bool,
    cache: BTreeMap<usize, CacheEntry>,
    lines: Vec<Arc<Line<'static>>>,
    line_width: usize,
}

impl<'a> BubbleList<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            show_time: true,
            cache: BTreeMap::new(),
            lines: Vec::new(),
            line_width: 0,
        }
    }

    pub fn with_timestamps(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }
        self.cache.retain(|i, _| *i < messages.len());

        for (i, message) in messages.iter().enumerate() {
            if let Some(entry) = self.cache.get(&i) {
                if entry.message_id == message.id() {
                    continue;
                }
            }

            let lines = Bubble::new(message, line_width)
                .with_timestamp(self.show_time)
                .as_lines(self.theme);
            self.cache.insert(
                i,
                CacheEntry {
                    message_id: message.id().to_string(),
                    lines: lines.into_iter().map(Arc::new).collect(),
                },
            );
        }

        self.lines = self
            .cache
            .values()
            .flat_map(|entry| entry.lines.clone())
            .collect();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self, rect: Rect, buf: &mut Buffer, scroll_index: usize) {
        for (i, line) in self
            .lines
            .iter()
            .skip(scroll_index)
            .take(rect.height as usize)
            .enumerate()
        {
            buf.set_line(rect.x, rect.y + i as u16, line, rect.width);
        }
    }
}
