use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum UserRole {
    Admin,
    #[default]
    Basic,
}

impl UserRole {
    /// The auth service reports `UserType` either as a number or a string,
    /// `1` marks an administrator.
    pub fn from_user_type(user_type: &serde_json::Value) -> Self {
        let raw = match user_type {
            serde_json::Value::String(s) => s.trim().to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => String::new(),
        };
        if raw == "1" {
            UserRole::Admin
        } else {
            UserRole::Basic
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "Admin"),
            UserRole::Basic => write!(f, "Basic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    email: String,
    name: String,
    #[serde(default)]
    role: UserRole,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role: UserRole::Basic,
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "User"
        } else {
            &self.name
        }
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}

/// Identity of the logged-in user. Built once at login (or restored from
/// the session file) and only read afterwards.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthContext {
    access_token: String,
    user: User,
}

impl AuthContext {
    pub fn new(access_token: impl Into<String>, user: User) -> Self {
        Self {
            access_token: access_token.into(),
            user,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn email(&self) -> &str {
        self.user.email()
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("access_token", &"***")
            .field("user", &self.user)
            .finish()
    }
}
