#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use crate::config::constants::NO_RESPONSE_MESSAGE;
use crate::models::{ChatReply, ExchangeMetadata, Message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceRequest {
    pub message_id: String,
    pub text: String,
}

pub fn send_error_text(description: &str) -> String {
    format!("Error: Could not get a reply from ResQ AI ({description})")
}

/// Transcript of the active conversation plus everything attached to its
/// latest exchange.
#[derive(Debug, Clone)]
pub struct ChatState {
    greeting: String,
    enhance_enabled: bool,

    messages: Vec<Message>,
    metadata: ExchangeMetadata,

    loading_transcript: bool,
    sending: bool,
    // Assistant message an enhance request is in flight for
    enhancing: Option<String>,
    session_active: bool,

    // Bumped on every transcript change, the view scrolls to the bottom
    // whenever it moves.
    revision: u64,
}

impl ChatState {
    pub fn new(greeting: impl Into<String>, enhance_enabled: bool) -> Self {
        let greeting = greeting.into();
        Self {
            messages: vec![Message::greeting(greeting.clone())],
            greeting,
            enhance_enabled,
            metadata: ExchangeMetadata::default(),
            loading_transcript: false,
            sending: false,
            enhancing: None,
            session_active: false,
            revision: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn metadata(&self) -> &ExchangeMetadata {
        &self.metadata
    }

    pub fn is_loading_transcript(&self) -> bool {
        self.loading_transcript
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn is_enhancing(&self) -> bool {
        self.enhancing.is_some()
    }

    pub fn is_session_active(&self) -> bool {
        self.session_active
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn reset_to_greeting(&mut self) {
        self.messages = vec![Message::greeting(self.greeting.clone())];
        self.loading_transcript = false;
        self.session_active = false;
        self.enhancing = None;
        self.metadata.clear();
        self.touch();
    }

    pub fn begin_load(&mut self) {
        self.loading_transcript = true;
        self.session_active = false;
        self.enhancing = None;
        self.metadata.clear();
    }

    /// An empty transcript means the conversation has no stored turns or
    /// could not be fetched. Both show the greeting.
    pub fn finish_load(&mut self, messages: Vec<Message>) {
        if messages.is_empty() {
            self.reset_to_greeting();
            return;
        }
        self.messages = messages;
        self.loading_transcript = false;
        self.metadata.clear();
        self.touch();
    }

    pub fn begin_send(&mut self, text: impl Into<String>) {
        self.messages.push(Message::new_user(text));
        self.metadata.clear();
        self.enhancing = None;
        self.session_active = true;
        self.sending = true;
        self.touch();
    }

    /// Clears the busy flag only. Used when the reply belongs to a
    /// conversation that is no longer active.
    pub fn abandon_send(&mut self) {
        self.sending = false;
    }

    pub fn finish_send(&mut self, reply: Result<ChatReply, String>) {
        self.sending = false;
        match reply {
            Ok(reply) => {
                let answer = if reply.answer.trim().is_empty() {
                    NO_RESPONSE_MESSAGE.to_string()
                } else {
                    reply.answer.clone()
                };
                self.messages.push(Message::new_assistant(answer));
                self.metadata = ExchangeMetadata::from_reply(&reply);
            }
            Err(description) => {
                self.messages
                    .push(Message::new_assistant(send_error_text(&description)));
                self.metadata.clear();
            }
        }
        self.touch();
    }

    /// Whether the "more context" control belongs under the latest message.
    pub fn offers_more_context(&self) -> bool {
        if !self.enhance_enabled || !self.session_active || self.sending {
            return false;
        }
        if self.loading_transcript {
            return false;
        }
        match self.messages.last() {
            Some(last) => last.is_assistant() && !last.is_greeting() && !last.has_no_details(),
            None => false,
        }
    }

    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_user())
            .map(|m| m.text())
    }

    pub fn has_enhanced_context(&self) -> bool {
        self.metadata.enhanced_context.is_some()
    }

    /// Marks the fetch as in flight for the latest reply, or returns `None`
    /// when the control is not available right now.
    pub fn begin_enhance(&mut self) -> Option<EnhanceRequest> {
        if self.enhancing.is_some() || !self.offers_more_context() {
            return None;
        }
        let text = self.last_user_text()?.to_string();
        let message_id = self.messages.last()?.id().to_string();
        self.enhancing = Some(message_id.clone());
        Some(EnhanceRequest { message_id, text })
    }

    /// Results for any other message than the one still waiting are
    /// dropped. A missing payload leaves the control as it was so the user
    /// can try again.
    pub fn finish_enhance(&mut self, message_id: &str, enhanced: Option<String>) {
        if self.enhancing.as_deref() != Some(message_id) {
            log::debug!("dropping context fetched for message {message_id}");
            return;
        }
        self.enhancing = None;
        if let Some(text) = enhanced.filter(|t| !t.trim().is_empty()) {
            self.metadata.enhanced_context = Some(text);
            self.metadata.enhanced_visible = true;
        }
    }

    pub fn toggle_enhanced(&mut self) {
        if self.has_enhanced_context() {
            self.metadata.enhanced_visible = !self.metadata.enhanced_visible;
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
