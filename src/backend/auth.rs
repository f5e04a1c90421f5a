#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

#[cfg(test)]
use mockall::automock;

use crate::backend::{normalize_url, user_agent};
use crate::config::constants::DEFAULT_AUTH_URL;
use crate::models::{AuthContext, User, UserRole};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time;
use thiserror::Error;

/// Login type the auth service expects for staff accounts.
const LOGIN_TYPE: &str = "0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,
    #[error("Login failed. Please try again later.")]
    Unavailable(String),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Authenticator {
    async fn login(&self, email: &str, password: &str) -> Result<AuthContext, AuthError>;
}

pub struct AuthClient {
    endpoint: String,
    timeout: Option<time::Duration>,
}

#[async_trait]
impl Authenticator for AuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthContext, AuthError> {
        let mut req = reqwest::Client::new()
            .post(format!("{}/auth/login", self.endpoint))
            .header("Content-Type", "application/json")
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let res = req
            .json(&LoginRequest {
                email,
                password,
                login_type: LOGIN_TYPE,
            })
            .send()
            .await
            .map_err(|err| AuthError::Unavailable(err.to_string()))?;

        let status = res.status();
        if status != reqwest::StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            log::warn!("login rejected with HTTP {}", status.as_u16());
            return Err(rejection(status, &body));
        }

        let body = res
            .json::<LoginResponse>()
            .await
            .map_err(|err| AuthError::Unavailable(format!("parsing login response: {err}")))?;

        let token = match body.access_token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::InvalidCredentials),
        };
        let user = body.user.ok_or_else(|| {
            AuthError::Unavailable("login response carries no user".to_string())
        })?;

        let role = UserRole::from_user_type(&user.user_type);
        log::info!("logged in as {} ({})", user.email, role);
        Ok(AuthContext::new(
            token,
            User::new(user.email, user.name).with_role(role),
        ))
    }
}

/// Only a JSON 4xx answer comes from the auth service itself. Server errors
/// and pages from a proxy in front of it mean the service is unreachable.
fn rejection(status: reqwest::StatusCode, body: &str) -> AuthError {
    let from_service =
        body.trim().is_empty() || serde_json::from_str::<serde_json::Value>(body).is_ok();
    if status.is_client_error() && from_service {
        AuthError::InvalidCredentials
    } else {
        AuthError::Unavailable(format!("HTTP {}", status.as_u16()))
    }
}

impl AuthClient {
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
}

impl Default for AuthClient {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_AUTH_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
    #[serde(rename = "LoginType")]
    login_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "AccessToken", default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<LoginUserResponse>,
}

#[derive(Debug, Deserialize)]
struct LoginUserResponse {
    #[serde(rename = "Email", default)]
    email: String,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "UserType", default)]
    user_type: serde_json::Value,
}
