use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding},
};

use crate::state::{DirectoryState, SidebarEntry};

use super::utils;

pub const EXPANDED_WIDTH: u16 = 30;
pub const COLLAPSED_WIDTH: u16 = 5;

pub fn width(directory: &DirectoryState) -> u16 {
    if directory.is_collapsed() {
        COLLAPSED_WIDTH
    } else {
        EXPANDED_WIDTH
    }
}

pub fn render(f: &mut Frame, area: Rect, directory: &DirectoryState, focused: bool) {
    let border = if focused {
        Color::LightBlue
    } else {
        Color::DarkGray
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));

    if directory.is_collapsed() {
        f.render_widget(block.title(" ≡ "), area);
        return;
    }

    let title = if directory.is_loading() {
        " Chats (loading…) "
    } else {
        " Chats "
    };
    block = block.title(title).padding(Padding::horizontal(1));

    let max_width = area.width.saturating_sub(6) as usize;
    let items = directory
        .entries()
        .into_iter()
        .map(|entry| build_item(entry, directory, max_width))
        .collect::<Vec<_>>();

    let mut state = ListState::default();
    if focused {
        state.select(Some(directory.cursor()));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut state);
}

fn build_item<'a>(entry: SidebarEntry<'_>, directory: &DirectoryState, max_width: usize) -> ListItem<'a> {
    match entry {
        SidebarEntry::NewChat => ListItem::new(Line::from("+ New chat").green().bold()),
        SidebarEntry::ClearAll => ListItem::new(Line::from("✕ Clear all").red()),
        SidebarEntry::Conversation(convo) => {
            let title = utils::truncate(convo.title(), max_width);
            if directory.is_selected(convo.id()) {
                ListItem::new(Line::from(format!("▸ {title}")).light_cyan().bold())
            } else {
                ListItem::new(Line::from(format!("  {title}")))
            }
        }
    }
}
