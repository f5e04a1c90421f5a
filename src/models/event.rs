use std::sync::Arc;

use tokio::sync::mpsc;
use tui_textarea::Input;

use super::{AuthContext, ChatReply, ConversationSummary, Message, NoticeMessage};

#[derive(Debug)]
pub enum Event {
    Notice(NoticeMessage),

    Backend(BackendEvent),
    LoginSucceeded(AuthContext),
    LoginFailed(NoticeMessage),
    LoggedOut,

    KeyboardCharInput(Input),
    KeyboardEsc,
    KeyboardEnter,
    KeyboardAltEnter,
    KeyboardTab,
    KeyboardCtrlB,
    KeyboardCtrlC,
    KeyboardCtrlE,
    KeyboardCtrlN,
    KeyboardCtrlO,
    KeyboardCtrlR,
    KeyboardF1,
    KeyboardPaste(String),

    NextTab,
    PrevTab,

    Quit,

    UiTick,
    UiScrollUp,
    UiScrollDown,
    UiScrollPageUp,
    UiScrollPageDown,
}

/// Outcomes of backend calls. Failures that must stay silent arrive here
/// already degraded (an empty list, a `None`).
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    ConversationsLoaded(Vec<ConversationSummary>),
    ConversationCreated(String),
    ConversationDeleted(String),
    HistoryCleared,
    TranscriptLoaded {
        convo_id: String,
        messages: Vec<Message>,
    },
    ReplyReceived {
        convo_id: String,
        reply: Result<ChatReply, String>,
    },
    ContextEnhanced {
        convo_id: String,
        message_id: String,
        enhanced: Option<String>,
    },
}

#[async_trait::async_trait]
pub trait EventTx {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>>;
}

#[async_trait::async_trait]
impl EventTx for mpsc::Sender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event).await
    }
}

#[async_trait::async_trait]
impl EventTx for mpsc::UnboundedSender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event)
    }
}

pub type ArcEventTx = Arc<dyn EventTx + Send + Sync>;
