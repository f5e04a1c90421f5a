pub mod auth;
pub mod resq;

pub use auth::{AuthClient, AuthError, Authenticator};
pub use resq::{BackendError, ResqClient};

#[cfg(test)]
pub use auth::MockAuthenticator;

#[cfg(test)]
use mockall::automock;

use crate::{
    config::{APP_NAME, ApiConfig, VERSION},
    models::{ChatReply, ConversationSummary, Message},
};
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;

/// The chatbot service. Every call is scoped to the user's email, the
/// service keeps no session of its own.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatBackend {
    async fn list_conversations(&self, email: &str) -> Result<Vec<ConversationSummary>>;
    async fn create_conversation(&self, email: &str) -> Result<String>;
    async fn delete_conversation(&self, convo_id: &str, email: &str) -> Result<()>;
    async fn clear_history(&self, email: &str) -> Result<()>;
    async fn load_transcript(&self, convo_id: &str, email: &str) -> Result<Vec<Message>>;
    async fn send_message(&self, convo_id: &str, email: &str, text: &str) -> Result<ChatReply>;
    async fn enhance_context(&self, convo_id: &str, email: &str, text: &str) -> Result<String>;
}

/// Sent with every request, `resq-rs/0.1.0`.
pub(crate) fn user_agent() -> String {
    format!("{APP_NAME}/{VERSION}")
}

/// Endpoints are joined with `format!("{endpoint}/path")`, so a configured
/// trailing slash is dropped.
pub(crate) fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub type ArcBackend = Arc<dyn ChatBackend + Send + Sync>;
pub type ArcAuthenticator = Arc<dyn Authenticator + Send + Sync>;

pub fn new_backend(config: &ApiConfig) -> ArcBackend {
    let mut client = ResqClient::default().with_endpoint(&config.base_url);
    if let Some(timeout) = config.timeout() {
        client = client.with_timeout(timeout);
    }
    Arc::new(client)
}

pub fn new_authenticator(config: &ApiConfig) -> ArcAuthenticator {
    let mut client = AuthClient::default().with_endpoint(&config.auth_url);
    if let Some(timeout) = config.timeout() {
        client = client.with_timeout(timeout);
    }
    Arc::new(client)
}
