use serde::{Deserialize, Serialize};

const UNTITLED: &str = "New Chat";

/// Directory entry as returned by `GET /conversations`. The title is
/// computed by the backend and may change between fetches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConversationSummary {
    id: String,
    #[serde(default)]
    title: Option<String>,
}

impl ConversationSummary {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED,
        }
    }
}
