/// Side effects requested by the dashboard and run by the action service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login { email: String, password: Password },
    Logout,

    ListConversations,
    CreateConversation,
    DeleteConversation(String), // Conversation ID
    ClearHistory,

    LoadTranscript(String), // Conversation ID
    SendMessage { convo_id: String, text: String },
    // `message_id` is the assistant message the context is fetched for
    EnhanceContext {
        convo_id: String,
        message_id: String,
        text: String,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password(***)")
    }
}
