//! File-backed session store used by the CLI.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use gasdesk_core::config::SessionConfig;
use gasdesk_core::error::AppError;
use gasdesk_core::result::AppResult;
use gasdesk_core::traits::SessionStore;
use gasdesk_core::types::Session;

/// On-disk session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Persists the session as JSON with the same max age as the web cookie.
///
/// A record past its expiry reads as absent, like an expired cookie.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    max_age: Duration,
}

impl FileSessionStore {
    /// Create a store writing to `path`.
    pub fn new(path: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            path: path.into(),
            max_age,
        }
    }

    /// Create a store from session configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(&config.file, Duration::days(config.max_age_days))
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn create_session(&self, token: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let record = SessionFile {
            token: token.to_string(),
            expires_at: Utc::now() + self.max_age,
        };
        let json = serde_json::to_vec_pretty(&record)?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            AppError::session(format!(
                "Failed to write session file '{}': {e}",
                self.path.display()
            ))
        })?;
        debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }

    async fn get_session(&self) -> AppResult<Option<Session>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: SessionFile = match serde_json::from_slice(&bytes) {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable session file, treating as absent");
                return Ok(None);
            }
        };
        if record.expires_at <= Utc::now() {
            debug!(path = %self.path.display(), "Session file expired");
            return Ok(None);
        }
        Ok(Some(Session::new(record.token)))
    }

    async fn delete_session(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
