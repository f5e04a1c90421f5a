#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use super::SessionStore;
use crate::models::{AuthContext, User};

/// JSON file holding the two session keys, `access_token` and `user`.
pub struct FileSession {
    path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSession {
    async fn load(&self) -> Result<Option<AuthContext>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).wrap_err(format!("reading {}", self.path.display()));
            }
        };

        let file = match serde_json::from_str::<SessionFile>(&raw) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("ignoring unreadable session file: {}", err);
                return Ok(None);
            }
        };

        match (file.access_token, file.user) {
            (Some(token), Some(user)) if !token.is_empty() => {
                Ok(Some(AuthContext::new(token, user)))
            }
            _ => Ok(None),
        }
    }

    async fn save(&self, ctx: &AuthContext) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .wrap_err(format!("creating directory {}", dir.display()))?;
        }

        let file = SessionFile {
            access_token: Some(ctx.access_token().to_string()),
            user: Some(ctx.user().clone()),
        };
        let raw = serde_json::to_string_pretty(&file).wrap_err("serializing session")?;
        tokio::fs::write(&self.path, raw)
            .await
            .wrap_err(format!("writing {}", self.path.display()))?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).wrap_err(format!("removing {}", self.path.display())),
        }
    }
}
