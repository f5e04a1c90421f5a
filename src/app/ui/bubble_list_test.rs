use ratatui::{buffer::Buffer, layout::Rect};
use syntect::highlighting::ThemeSet;
use unicode_width::UnicodeWidthStr;

use super::*;

fn theme() -> Theme {
    ThemeSet::load_defaults().themes["base16-ocean.dark"].clone()
}

fn line_text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.to_string()).collect()
}

#[test]
fn test_bubbles_are_aligned_by_role() {
    let theme = theme();
    let mut list = BubbleList::new(&theme).with_timestamps(false);
    let messages = vec![
        Message::new_user("dose?"),
        Message::new_assistant("5mg"),
    ];
    list.set_messages(&messages, 40);

    // Top bar, one line of text, bottom bar per message
    assert_eq!(list.len(), 6);

    let user_top = line_text(&list.lines[0]);
    assert!(user_top.starts_with(' '));
    assert!(user_top.trim_start().starts_with("╭─ You "));
    assert_eq!(user_top.width(), 40);

    let assistant_top = line_text(&list.lines[3]);
    assert!(assistant_top.starts_with("╭─ ResQ AI "));
    assert!(line_text(&list.lines[4]).contains("5mg"));
}

#[test]
fn test_set_messages_rebuilds_changed_positions() {
    let theme = theme();
    let mut list = BubbleList::new(&theme).with_timestamps(false);

    list.set_messages(&[Message::greeting("Hello")], 40);
    assert_eq!(list.len(), 3);

    let transcript = vec![
        Message::new_user("line one\nline two"),
        Message::new_assistant("ok"),
    ];
    list.set_messages(&transcript, 40);
    assert_eq!(list.len(), 7);
    assert!(line_text(&list.lines[1]).contains("line one"));

    list.set_messages(&transcript[..1], 40);
    assert_eq!(list.len(), 4);
}

#[test]
fn test_render_scrolls() {
    let theme = theme();
    let mut list = BubbleList::new(&theme).with_timestamps(false);
    list.set_messages(&[Message::new_assistant("a"), Message::new_assistant("b")], 20);

    let area = Rect::new(0, 0, 20, 2);
    let mut buf = Buffer::empty(area);
    list.render(area, &mut buf, 4);

    let row: String = (0..20).map(|x| buf[(x, 0)].symbol().to_string()).collect();
    assert!(row.contains('b'));
}

#[test]
fn test_lines_outlive_the_transcript() {
    let theme = theme();
    let mut list = BubbleList::new(&theme).with_timestamps(false);
    {
        let transcript = vec![Message::new_assistant("short lived")];
        list.set_messages(&transcript, 40);
    }
    assert!(line_text(&list.lines[1]).contains("short lived"));
}

#[test]
fn test_tabs_expand_only_when_rendered() {
    let theme = theme();
    let mut list = BubbleList::new(&theme).with_timestamps(false);
    let message = Message::new_assistant("a\tb");
    list.set_messages(std::slice::from_ref(&message), 40);

    assert_eq!(message.text(), "a\tb");
    assert!(line_text(&list.lines[1]).contains("a  b"));
}
