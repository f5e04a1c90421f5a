use serde::{Deserialize, Serialize};

/// A citation attached to an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    pub label: String,
    pub link: String,
}

/// What `POST /chat` gives back, already normalised: empty follow-ups are
/// `None` and every source has a label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatReply {
    pub answer: String,
    pub follow_up: Option<String>,
    pub sources: Vec<Source>,
}

/// Transient data about the latest exchange. Never persisted, dropped when
/// the conversation changes or a new message goes out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeMetadata {
    pub follow_up: Option<String>,
    pub sources: Vec<Source>,
    pub enhanced_context: Option<String>,
    pub enhanced_visible: bool,
}

impl ExchangeMetadata {
    pub fn from_reply(reply: &ChatReply) -> Self {
        Self {
            follow_up: reply.follow_up.clone(),
            sources: reply.sources.clone(),
            ..Default::default()
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.follow_up.is_none() && self.sources.is_empty() && self.enhanced_context.is_none()
    }
}
