#[cfg(test)]
#[path = "action_test.rs"]
mod tests;

use std::sync::Arc;

use crate::backend::{ArcAuthenticator, ArcBackend};
use crate::models::{Action, ArcEventTx, AuthContext, BackendEvent, Event, Password};
use crate::session::ArcSessionStore;
use crate::{error_notice, warn_notice};
use eyre::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Runs the side effects requested by the dashboard. Backend calls go to
/// their own task and report back through the event channel.
pub struct ActionService<'a> {
    event_tx: ArcEventTx,
    action_rx: &'a mut mpsc::UnboundedReceiver<Action>,
    cancel_token: CancellationToken,
    backend: ArcBackend,
    authenticator: ArcAuthenticator,
    session: ArcSessionStore,
    auth: Option<Arc<AuthContext>>,
}

impl ActionService<'_> {
    pub fn new(
        event_tx: ArcEventTx,
        action_rx: &'_ mut mpsc::UnboundedReceiver<Action>,
        backend: ArcBackend,
        authenticator: ArcAuthenticator,
        session: ArcSessionStore,
        cancel_token: CancellationToken,
    ) -> ActionService<'_> {
        ActionService {
            event_tx,
            action_rx,
            cancel_token,
            backend,
            authenticator,
            session,
            auth: None,
        }
    }

    /// Identity restored from the session file.
    pub fn with_auth(mut self, auth: Option<AuthContext>) -> Self {
        self.auth = auth.map(Arc::new);
        self
    }

    pub async fn start(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    log::debug!("Action service cancelled");
                    return Ok(());
                }

                action = self.action_rx.recv() => {
                    let Some(action) = action else {
                        log::debug!("Action channel closed");
                        return Ok(());
                    };

                    match action {
                        Action::Login { email, password } => self.login(&email, &password).await?,
                        Action::Logout => self.logout().await?,
                        action => self.spawn(action),
                    }
                }
            }
        }
    }

    async fn login(&mut self, email: &str, password: &Password) -> Result<()> {
        match self.authenticator.login(email, password.expose()).await {
            Ok(ctx) => {
                if let Err(err) = self.session.save(&ctx).await {
                    log::warn!("Failed to persist session: {:#}", err);
                }
                self.auth = Some(Arc::new(ctx.clone()));
                self.event_tx.send(Event::LoginSucceeded(ctx)).await?;
            }
            Err(err) => {
                log::warn!("Login failed for {}: {:?}", email, err);
                self.event_tx
                    .send(Event::LoginFailed(error_notice!(err.to_string())))
                    .await?;
            }
        }
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        self.auth = None;
        if let Err(err) = self.session.clear().await {
            log::warn!("Failed to clear session: {:#}", err);
        }
        self.event_tx.send(Event::LoggedOut).await?;
        Ok(())
    }

    fn spawn(&self, action: Action) {
        let Some(auth) = self.auth.as_ref().map(Arc::clone) else {
            log::warn!("Dropping {:?}, nobody is signed in", action);
            return;
        };
        let backend = Arc::clone(&self.backend);
        let event_tx = Arc::clone(&self.event_tx);

        tokio::spawn(async move {
            for event in dispatch(&backend, auth.email(), action).await {
                if let Err(err) = event_tx.send(event).await {
                    log::error!("Failed to send event: {}", err);
                }
            }
        });
    }
}

/// Runs one backend action and turns its outcome into events. Failures are
/// degraded here, only a failed send reaches the transcript.
pub async fn dispatch(backend: &ArcBackend, email: &str, action: Action) -> Vec<Event> {
    let event = match action {
        Action::ListConversations => {
            let conversations = backend
                .list_conversations(email)
                .await
                .unwrap_or_else(|err| {
                    log::warn!("Failed to list conversations: {:#}", err);
                    vec![]
                });
            BackendEvent::ConversationsLoaded(conversations)
        }

        Action::CreateConversation => match backend.create_conversation(email).await {
            Ok(id) => BackendEvent::ConversationCreated(id),
            Err(err) => {
                log::warn!("Failed to create conversation: {:#}", err);
                return vec![Event::Notice(warn_notice!(
                    "Could not start a new conversation."
                ))];
            }
        },

        Action::DeleteConversation(id) => {
            if let Err(err) = backend.delete_conversation(&id, email).await {
                log::warn!("Failed to delete conversation {}: {:#}", id, err);
            }
            BackendEvent::ConversationDeleted(id)
        }

        Action::ClearHistory => {
            if let Err(err) = backend.clear_history(email).await {
                log::warn!("Failed to clear history: {:#}", err);
            }
            BackendEvent::HistoryCleared
        }

        Action::LoadTranscript(convo_id) => {
            let messages = backend
                .load_transcript(&convo_id, email)
                .await
                .unwrap_or_else(|err| {
                    log::warn!("Failed to load conversation {}: {:#}", convo_id, err);
                    vec![]
                });
            BackendEvent::TranscriptLoaded { convo_id, messages }
        }

        Action::SendMessage { convo_id, text } => {
            let reply = backend
                .send_message(&convo_id, email, &text)
                .await
                .map_err(|err| {
                    log::error!("Failed to send message: {:#}", err);
                    format!("{:#}", err)
                });
            BackendEvent::ReplyReceived { convo_id, reply }
        }

        Action::EnhanceContext {
            convo_id,
            message_id,
            text,
        } => {
            let enhanced = match backend.enhance_context(&convo_id, email, &text).await {
                Ok(enhanced) => Some(enhanced),
                Err(err) => {
                    log::warn!("Failed to enhance context: {:#}", err);
                    None
                }
            };
            BackendEvent::ContextEnhanced {
                convo_id,
                message_id,
                enhanced,
            }
        }

        Action::Login { .. } | Action::Logout => return vec![],
    };

    vec![Event::Backend(event)]
}
