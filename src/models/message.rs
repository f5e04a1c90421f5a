#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use crate::config::constants::NO_DETAILS_MARKER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Message {
    id: String,
    role: Role,
    text: String,
    greeting: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            greeting: false,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn new_user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn new_assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// The synthetic opening message. It has no paired user turn.
    pub fn greeting(text: impl Into<String>) -> Self {
        let mut msg = Self::new(Role::Assistant, text);
        msg.greeting = true;
        msg
    }

    pub fn with_created_at(mut self, created_at: chrono::DateTime<chrono::Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    pub fn is_greeting(&self) -> bool {
        self.greeting
    }

    pub fn has_no_details(&self) -> bool {
        self.text.to_lowercase().contains(NO_DETAILS_MARKER)
    }

    pub fn author(&self) -> &str {
        match self.role {
            Role::User => "You",
            Role::Assistant => "ResQ AI",
        }
    }
}

impl PartialEq for Message {
    /// Two messages are equal when they carry the same turn, ids and
    /// timestamps are rendering details.
    fn eq(&self, other: &Self) -> bool {
        self.role == other.role && self.text == other.text && self.greeting == other.greeting
    }
}
