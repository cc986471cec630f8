//! In-process session store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use gasdesk_core::result::AppResult;
use gasdesk_core::traits::SessionStore;
use gasdesk_core::types::Session;

/// Session held in memory for the lifetime of one application instance.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            session: RwLock::new(Some(Session::new(token))),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create_session(&self, token: &str) -> AppResult<()> {
        *self.session.write().await = Some(Session::new(token));
        debug!("Session created");
        Ok(())
    }

    async fn get_session(&self) -> AppResult<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn delete_session(&self) -> AppResult<()> {
        *self.session.write().await = None;
        debug!("Session deleted");
        Ok(())
    }
}
