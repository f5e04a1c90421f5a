#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;

use crate::models::ConversationSummary;

/// Result of applying a fresh conversation list to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Unchanged,
    Selected(String),
    Cleared,
}

/// One row of the sidebar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry<'a> {
    NewChat,
    Conversation(&'a ConversationSummary),
    ClearAll,
}

/// The user's conversation list and the current selection. The cursor is
/// the keyboard position in the sidebar and moves independently of the
/// selection.
#[derive(Debug, Default, Clone)]
pub struct DirectoryState {
    conversations: Vec<ConversationSummary>,
    selected: Option<String>,
    loading: bool,
    cursor: usize,
    collapsed: bool,
}

impl DirectoryState {
    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replaces the list and reconciles the selection with it. A selection
    /// missing from a non-empty list survives, the backend may not list a
    /// freshly created conversation yet.
    pub fn apply(&mut self, conversations: Vec<ConversationSummary>) -> SelectionChange {
        self.loading = false;
        self.conversations = conversations;

        let last = self.conversations.last().map(|c| c.id().to_string());
        let change = match (self.selected.is_some(), last) {
            (true, None) => {
                self.selected = None;
                SelectionChange::Cleared
            }
            (false, Some(id)) => {
                self.selected = Some(id.clone());
                SelectionChange::Selected(id)
            }
            _ => SelectionChange::Unchanged,
        };

        self.follow_selection();
        change
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
        self.follow_selection();
    }

    /// Drops the selection if it points at `id`. Returns whether it did.
    pub fn deselect(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.selected = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.conversations.clear();
        self.selected = None;
        self.cursor = 0;
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn entries(&self) -> Vec<SidebarEntry<'_>> {
        let mut entries = Vec::with_capacity(self.conversations.len() + 2);
        entries.push(SidebarEntry::NewChat);
        entries.extend(self.conversations.iter().map(SidebarEntry::Conversation));
        if !self.conversations.is_empty() {
            entries.push(SidebarEntry::ClearAll);
        }
        entries
    }

    pub fn cursor_entry(&self) -> Option<SidebarEntry<'_>> {
        self.entries().get(self.cursor).copied()
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let last = self.entries().len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    fn follow_selection(&mut self) {
        let position = self
            .selected
            .as_deref()
            .and_then(|id| self.conversations.iter().position(|c| c.id() == id));
        self.cursor = match position {
            // Skip the "New chat" row
            Some(idx) => idx + 1,
            None => self.cursor.min(self.entries().len().saturating_sub(1)),
        };
    }
}
