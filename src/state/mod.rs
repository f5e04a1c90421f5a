//! Dashboard state. Everything here is a plain state transition: the
//! reducer mutates the state and hands back the side effects it wants run.

pub mod chat;
pub mod directory;
pub mod shell;

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;

pub use chat::{ChatState, EnhanceRequest};
pub use directory::{DirectoryState, SelectionChange, SidebarEntry};
pub use shell::ShellState;

use crate::config::Configuration;
use crate::models::{Action, BackendEvent, Tab};

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectTab(Tab),
    NextTab,
    PrevTab,

    Refresh,
    SelectConversation(String),
    NewConversation,
    DeleteConversation(String),
    ClearAll,
    ToggleSidebar,
    CursorUp,
    CursorDown,

    InputFocused,
    Send(String),
    MoreContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    User(Intent),
    Backend(BackendEvent),
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub shell: ShellState,
    pub directory: DirectoryState,
    pub chat: ChatState,
    // A create went out for the current stretch of focus without a selection
    focus_create_sent: bool,
}

impl Dashboard {
    pub fn new(tabs: Vec<Tab>, greeting: impl Into<String>, enhance_enabled: bool) -> Self {
        Self {
            shell: ShellState::new(tabs),
            directory: DirectoryState::default(),
            chat: ChatState::new(greeting, enhance_enabled),
            focus_create_sent: false,
        }
    }

    pub fn from_config(config: &Configuration) -> Self {
        Self::new(
            config.shell.tabs.clone(),
            config.general.greeting.clone(),
            config.features.enhance_context,
        )
    }

    pub fn active_conversation(&self) -> Option<&str> {
        self.directory.selected()
    }

    /// Typing is only possible once a conversation is selected and no reply
    /// is pending.
    pub fn accepts_input(&self) -> bool {
        self.directory.selected().is_some() && !self.chat.is_sending()
    }

    /// Called after every state change with the current input focus. While
    /// the input holds focus with nothing selected and the directory is
    /// settled, one conversation is created. Nothing more is asked for until
    /// a selection appears or the input loses focus.
    pub fn follow_focus(&mut self, input_focused: bool) -> Vec<Action> {
        let wants_conversation = input_focused
            && self.directory.selected().is_none()
            && !self.directory.is_loading();
        if !wants_conversation {
            self.focus_create_sent = false;
            return vec![];
        }
        if self.focus_create_sent {
            return vec![];
        }
        self.on_intent(Intent::InputFocused)
    }

    pub fn reduce(&mut self, input: Input) -> Vec<Action> {
        match input {
            Input::User(intent) => self.on_intent(intent),
            Input::Backend(event) => self.on_backend(event),
        }
    }

    fn on_intent(&mut self, intent: Intent) -> Vec<Action> {
        match intent {
            Intent::SelectTab(tab) => {
                self.shell.select(tab);
                vec![]
            }
            Intent::NextTab => {
                self.shell.next();
                vec![]
            }
            Intent::PrevTab => {
                self.shell.prev();
                vec![]
            }

            Intent::Refresh => {
                if self.directory.is_loading() {
                    return vec![];
                }
                vec![self.refresh()]
            }
            Intent::SelectConversation(id) => {
                self.directory.select(id.clone());
                self.chat.begin_load();
                vec![Action::LoadTranscript(id)]
            }
            Intent::NewConversation => vec![Action::CreateConversation],
            Intent::DeleteConversation(id) => vec![Action::DeleteConversation(id)],
            Intent::ClearAll => vec![Action::ClearHistory],
            Intent::ToggleSidebar => {
                self.directory.toggle_collapsed();
                vec![]
            }
            Intent::CursorUp => {
                self.directory.cursor_up();
                vec![]
            }
            Intent::CursorDown => {
                self.directory.cursor_down();
                vec![]
            }

            // One create per focus event, nothing else is deduplicated.
            Intent::InputFocused => match self.directory.selected() {
                Some(_) => vec![],
                None => {
                    self.focus_create_sent = true;
                    vec![Action::CreateConversation]
                }
            },
            Intent::Send(text) => {
                if text.trim().is_empty() || self.chat.is_sending() {
                    return vec![];
                }
                let Some(convo_id) = self.directory.selected().map(str::to_string) else {
                    return vec![];
                };
                self.chat.begin_send(text.clone());
                vec![Action::SendMessage { convo_id, text }]
            }
            Intent::MoreContext => {
                if self.chat.has_enhanced_context() {
                    self.chat.toggle_enhanced();
                    return vec![];
                }
                let Some(convo_id) = self.directory.selected().map(str::to_string) else {
                    return vec![];
                };
                match self.chat.begin_enhance() {
                    Some(request) => vec![Action::EnhanceContext {
                        convo_id,
                        message_id: request.message_id,
                        text: request.text,
                    }],
                    None => vec![],
                }
            }
        }
    }

    fn on_backend(&mut self, event: BackendEvent) -> Vec<Action> {
        match event {
            BackendEvent::ConversationsLoaded(conversations) => {
                match self.directory.apply(conversations) {
                    SelectionChange::Selected(id) => {
                        self.chat.begin_load();
                        vec![Action::LoadTranscript(id)]
                    }
                    SelectionChange::Cleared => {
                        self.chat.reset_to_greeting();
                        vec![]
                    }
                    SelectionChange::Unchanged => vec![],
                }
            }
            BackendEvent::ConversationCreated(id) => {
                self.directory.select(id.clone());
                self.chat.begin_load();
                vec![self.refresh(), Action::LoadTranscript(id)]
            }
            BackendEvent::ConversationDeleted(id) => {
                if self.directory.deselect(&id) {
                    self.chat.reset_to_greeting();
                }
                vec![self.refresh()]
            }
            BackendEvent::HistoryCleared => {
                self.directory.clear();
                self.chat.reset_to_greeting();
                vec![self.refresh()]
            }
            BackendEvent::TranscriptLoaded { convo_id, messages } => {
                if !self.directory.is_selected(&convo_id) {
                    log::debug!("dropping transcript of inactive conversation {convo_id}");
                    return vec![];
                }
                self.chat.finish_load(messages);
                vec![]
            }
            BackendEvent::ReplyReceived { convo_id, reply } => {
                if !self.directory.is_selected(&convo_id) {
                    log::debug!("dropping reply for inactive conversation {convo_id}");
                    self.chat.abandon_send();
                    return vec![self.refresh()];
                }
                let succeeded = reply.is_ok();
                self.chat.finish_send(reply);
                if succeeded {
                    vec![self.refresh()]
                } else {
                    vec![]
                }
            }
            BackendEvent::ContextEnhanced {
                convo_id,
                message_id,
                enhanced,
            } => {
                if !self.directory.is_selected(&convo_id) {
                    log::debug!("dropping context of inactive conversation {convo_id}");
                    return vec![];
                }
                self.chat.finish_enhance(&message_id, enhanced);
                vec![]
            }
        }
    }

    fn refresh(&mut self) -> Action {
        self.directory.begin_load();
        Action::ListConversations
    }
}
