pub mod file;

pub use file::FileSession;

use std::sync::Arc;

use crate::{
    config::{SessionConfig, resolve_path},
    models::AuthContext,
};
use async_trait::async_trait;
use eyre::{Context, Result};

/// Persists the access token and user identity between runs.
#[async_trait]
pub trait SessionStore {
    async fn load(&self) -> Result<Option<AuthContext>>;
    async fn save(&self, ctx: &AuthContext) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

pub type ArcSessionStore = Arc<dyn SessionStore + Send + Sync>;

pub fn new_session_store(config: &SessionConfig) -> Result<ArcSessionStore> {
    let path = resolve_path(&config.path).wrap_err("resolving session file path")?;
    Ok(Arc::new(FileSession::new(path)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// The dashboard is only reachable with a stored access token. Nothing is
/// validated against the server here.
pub fn resolve_route(session: Option<&AuthContext>) -> Route {
    match session {
        Some(ctx) if !ctx.access_token().is_empty() => Route::Dashboard,
        _ => Route::Login,
    }
}
