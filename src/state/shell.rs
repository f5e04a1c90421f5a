use crate::models::Tab;

#[derive(Debug, Clone)]
pub struct ShellState {
    tabs: Vec<Tab>,
    active: usize,
}

impl ShellState {
    /// An empty tab list falls back to the assistant alone.
    pub fn new(tabs: Vec<Tab>) -> Self {
        let tabs = if tabs.is_empty() {
            vec![Tab::AiAssistant]
        } else {
            tabs
        };
        Self { tabs, active: 0 }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active(&self) -> Tab {
        self.tabs[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn shows_chat(&self) -> bool {
        self.active().is_live()
    }

    /// Tabs that are not configured are ignored.
    pub fn select(&mut self, tab: Tab) {
        if let Some(idx) = self.tabs.iter().position(|t| *t == tab) {
            self.active = idx;
        }
    }

    pub fn next(&mut self) {
        self.active = (self.active + 1) % self.tabs.len();
    }

    pub fn prev(&mut self) {
        self.active = (self.active + self.tabs.len() - 1) % self.tabs.len();
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(Tab::all().to_vec())
    }
}
