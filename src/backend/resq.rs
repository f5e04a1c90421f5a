#[cfg(test)]
#[path = "resq_test.rs"]
mod tests;

use crate::backend::{ArcBackend, ChatBackend, normalize_url, user_agent};
use crate::config::constants::DEFAULT_BASE_URL;
use crate::models::{ChatReply, ConversationSummary, Message, Source};
use async_trait::async_trait;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time;
use thiserror::Error;

/// HTTP client for the ResQ chatbot service.
pub struct ResqClient {
    endpoint: String,
    timeout: Option<time::Duration>,
    http: reqwest::Client,
}

#[async_trait]
impl ChatBackend for ResqClient {
    async fn list_conversations(&self, email: &str) -> Result<Vec<ConversationSummary>> {
        let res = self
            .request(reqwest::Method::GET, "/conversations")
            .query(&[("email", email)])
            .send()
            .await
            .wrap_err("listing conversations")?;
        let res = check_status(res).await?;

        // The service answers with an object instead of an array when the
        // user has no history file yet.
        let body: serde_json::Value = res
            .json()
            .await
            .wrap_err("parsing conversation list response")?;
        if !body.is_array() {
            log::debug!("conversation list is not an array: {}", body);
            return Ok(vec![]);
        }

        let conversations = serde_json::from_value::<Vec<ConversationSummary>>(body)
            .wrap_err("decoding conversation list")?;
        Ok(conversations)
    }

    async fn create_conversation(&self, email: &str) -> Result<String> {
        let res = self
            .request(reqwest::Method::POST, "/new_conversation")
            .json(&EmailRequest { email })
            .send()
            .await
            .wrap_err("creating conversation")?;
        let res = check_status(res).await?;

        let created = res
            .json::<NewConversationResponse>()
            .await
            .wrap_err("parsing new conversation response")?;
        if created.id.is_empty() {
            eyre::bail!("backend returned an empty conversation id");
        }
        Ok(created.id)
    }

    async fn delete_conversation(&self, convo_id: &str, email: &str) -> Result<()> {
        let res = self
            .request(reqwest::Method::DELETE, &format!("/conversation/{convo_id}"))
            .query(&[("email", email)])
            .send()
            .await
            .wrap_err(format!("deleting conversation {convo_id}"))?;
        check_status(res).await?;
        Ok(())
    }

    async fn clear_history(&self, email: &str) -> Result<()> {
        let res = self
            .request(reqwest::Method::POST, "/clear_history")
            .json(&EmailRequest { email })
            .send()
            .await
            .wrap_err("clearing history")?;
        check_status(res).await?;
        Ok(())
    }

    async fn load_transcript(&self, convo_id: &str, email: &str) -> Result<Vec<Message>> {
        let res = self
            .request(reqwest::Method::GET, &format!("/conversation/{convo_id}"))
            .query(&[("email", email)])
            .send()
            .await
            .wrap_err(format!("loading conversation {convo_id}"))?;
        let res = check_status(res).await?;

        let transcript = res
            .json::<TranscriptResponse>()
            .await
            .wrap_err("parsing conversation response")?;
        if let Some(err) = transcript.error {
            log::debug!("conversation {convo_id} not loaded: {err}");
        }
        Ok(flatten_records(transcript.messages))
    }

    async fn send_message(&self, convo_id: &str, email: &str, text: &str) -> Result<ChatReply> {
        let req = ChatRequest {
            user_input: text,
            email,
            convo_id,
            enhance_context: false,
        };
        log::trace!("sending chat request for conversation {convo_id}");

        let res = self
            .request(reqwest::Method::POST, "/chat")
            .json(&req)
            .send()
            .await
            .wrap_err("sending chat request")?;
        let res = check_status(res).await?;

        let reply = res
            .json::<ChatResponse>()
            .await
            .wrap_err("parsing chat response")?;
        Ok(reply.into())
    }

    async fn enhance_context(&self, convo_id: &str, email: &str, text: &str) -> Result<String> {
        let req = EnhanceRequest {
            user_input: text,
            email,
            convo_id,
        };
        let res = self
            .request(reqwest::Method::POST, "/enhance_context")
            .json(&req)
            .send()
            .await
            .wrap_err("sending enhance context request")?;
        let res = check_status(res).await?;

        let enhanced = res
            .json::<EnhanceResponse>()
            .await
            .wrap_err("parsing enhance context response")?;
        match enhanced.enhanced_context {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => eyre::bail!("backend returned no enhanced context"),
        }
    }
}

impl From<ResqClient> for ArcBackend {
    fn from(value: ResqClient) -> Self {
        Arc::new(value)
    }
}

impl ResqClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = normalize_url(endpoint);
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<time::Duration> {
        self.timeout
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.endpoint, path))
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        req
    }
}

impl Default for ResqClient {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            http: reqwest::Client::new(),
        }
    }
}

async fn check_status(res: reqwest::Response) -> Result<reqwest::Response> {
    if res.status().is_success() {
        return Ok(res);
    }

    let http_code = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    log::error!("Error response ({}): {}", http_code, body);
    Err(BackendError { http_code, body }.into())
}

/// Backend records carry an optional user turn and an optional assistant
/// turn. A record with both becomes the user message followed by the reply.
fn flatten_records(records: Vec<RecordResponse>) -> Vec<Message> {
    let mut messages = vec![];
    for record in records {
        if let Some(user) = record.user.filter(|s| !s.is_empty()) {
            messages.push(Message::new_user(user));
        }
        if let Some(ai) = record.ai.filter(|s| !s.is_empty()) {
            messages.push(Message::new_assistant(ai));
        }
    }
    messages
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    user_input: &'a str,
    email: &'a str,
    convo_id: &'a str,
    enhance_context: bool,
}

#[derive(Debug, Serialize)]
struct EnhanceRequest<'a> {
    user_input: &'a str,
    email: &'a str,
    convo_id: &'a str,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct NewConversationResponse {
    #[serde(default)]
    id: String,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct RecordResponse {
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    ai: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    messages: Vec<RecordResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct SourceResponse {
    #[serde(default)]
    link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    follow_up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<SourceResponse>>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct EnhanceResponse {
    #[serde(default)]
    enhanced_context: Option<String>,
}

#[derive(Default, Error, Debug)]
pub struct BackendError {
    pub http_code: u16,
    pub body: String,
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "backend returned HTTP {}", self.http_code)
    }
}

impl From<ChatResponse> for ChatReply {
    fn from(value: ChatResponse) -> Self {
        let sources = value
            .sources
            .unwrap_or_default()
            .into_iter()
            .filter(|s| !s.link.is_empty())
            .map(|s| Source {
                label: s
                    .label
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| s.link.clone()),
                link: s.link,
            })
            .collect();

        Self {
            answer: value.answer.unwrap_or_default(),
            follow_up: value.follow_up.filter(|f| !f.trim().is_empty()),
            sources,
        }
    }
}
