#[cfg(test)]
#[path = "details_test.rs"]
mod tests;

use ratatui::{
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
};

use crate::state::ChatState;

use super::utils;

/// Lines shown under the transcript for the latest exchange: sources, the
/// follow-up suggestion and the "more context" control with its text.
pub fn build_lines<'a>(chat: &ChatState, max_width: usize) -> Vec<Line<'a>> {
    let metadata = chat.metadata();
    let mut lines = vec![];

    if !metadata.sources.is_empty() {
        lines.push(Line::from("Sources").bold());
        for source in &metadata.sources {
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(source.label.clone(), Style::default().fg(Color::LightBlue)),
                Span::styled(format!("  {}", source.link), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    if let Some(follow_up) = &metadata.follow_up {
        let text = vec![
            Span::styled(
                "Follow-up suggestion: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(follow_up.clone(), Style::default().fg(Color::Yellow)),
        ];
        lines.extend(utils::split_to_lines(text, max_width));
    }

    if let Some(label) = more_context_label(chat) {
        lines.push(Line::from(label).italic().light_magenta());
    }

    if metadata.enhanced_visible {
        if let Some(enhanced) = &metadata.enhanced_context {
            lines.push(Line::from("More context").bold().light_magenta());
            for line in enhanced.lines() {
                lines.extend(utils::split_to_lines(line.to_string(), max_width));
            }
        }
    }

    lines
}

fn more_context_label(chat: &ChatState) -> Option<&'static str> {
    if chat.has_enhanced_context() {
        return Some(if chat.metadata().enhanced_visible {
            "Ctrl+E hide context"
        } else {
            "Ctrl+E show context"
        });
    }
    if !chat.offers_more_context() {
        return None;
    }
    if chat.is_enhancing() {
        return Some("Loading more context…");
    }
    Some("Ctrl+E more context")
}
