#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
};
use syntect::{easy::HighlightLines, highlighting::Theme};
use unicode_width::UnicodeWidthStr;

use super::syntaxes::{SYNTAX_SET, Syntaxes};

pub fn popup_area(area: Rect, percent_width: u16, percent_height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_width)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

pub fn notice_area(area: Rect, percent_width: u16) -> Rect {
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_width)]).flex(Flex::End);
    let [area] = horizontal.areas(area);
    area
}

/// Word-wraps styled text. Words wider than `max_width` get a line of
/// their own.
pub fn split_to_lines<'a>(text: impl Into<Line<'a>>, max_width: usize) -> Vec<Line<'a>> {
    let mut lines = vec![];
    let mut line = vec![];
    let mut line_width = 0;

    for word in split_spans(text) {
        if line_width + word.content.width() > max_width && !line.is_empty() {
            lines.push(Line::from(line));
            line = vec![];
            line_width = 0;
        }
        line_width += word.width();
        line.push(word);
    }
    if !line.is_empty() {
        lines.push(Line::from(line));
    }
    lines
}

fn split_spans<'a>(input: impl Into<Line<'a>>) -> Vec<Span<'a>> {
    input
        .into()
        .spans
        .into_iter()
        .flat_map(split_span_by_space)
        .collect()
}

fn split_span_by_space(span: Span) -> Vec<Span> {
    let mut spans = vec![];
    let s = span.content.to_string();
    let mut in_word = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c == ' ' {
            if in_word {
                spans.push(Span::styled(s[start..i].to_string(), span.style));
                in_word = false;
            }
            let space_end = i + c.len_utf8();
            spans.push(Span::styled(s[i..space_end].to_string(), span.style));
            start = space_end;
        } else if !in_word {
            start = i;
            in_word = true;
        }
    }
    if in_word {
        spans.push(Span::styled(s[start..].to_string(), span.style));
    }
    spans
        .into_iter()
        .filter(|s| s.content.width() > 0)
        .collect()
}

/// Splits a reply into display lines. Fenced code blocks are highlighted
/// with the syntax named after the opening fence.
pub fn build_message_lines<F>(
    content: &str,
    max_width: usize,
    theme: &Theme,
    format_line: F,
) -> Vec<Line<'static>>
where
    F: Fn(Line<'static>) -> Line<'static>,
{
    let mut highlight = HighlightLines::new(Syntaxes::get("text"), theme);
    let mut in_codeblock = false;
    let mut lines = vec![];

    for line in content.lines() {
        let mut spans = vec![];
        if line.trim().starts_with("```") {
            if !in_codeblock {
                let lang = line.trim().trim_start_matches("```");
                highlight = HighlightLines::new(Syntaxes::get(lang), theme);
            }
            in_codeblock = !in_codeblock;
            spans.push(Span::from(line.to_owned()));
        } else if in_codeblock {
            spans = highlight_code(&mut highlight, line);
        }

        if spans.is_empty() {
            spans.push(Span::styled(line.to_owned(), Style::default()));
        }

        lines.extend(split_to_lines(spans, max_width).into_iter().map(&format_line));
    }
    lines
}

fn highlight_code(highlight: &mut HighlightLines, line: &str) -> Vec<Span<'static>> {
    let line_nl = format!("{line}\n");
    let Ok(segments) = highlight.highlight_line(&line_nl, &SYNTAX_SET) else {
        return vec![];
    };

    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .map(|(i, (style, content))| {
            let text = if i == last {
                content.trim_end().to_string()
            } else {
                content.to_string()
            };
            Span::styled(
                text,
                Style {
                    fg: Syntaxes::translate_colour(style.foreground),
                    ..Style::default()
                },
            )
        })
        .collect()
}

/// `text` repeated for whatever is left of `total` after `used`.
pub fn fill(text: &str, total: usize, used: &[usize]) -> String {
    let count = used.iter().fold(total, |acc, n| acc.saturating_sub(*n));
    text.repeat(count)
}

pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
