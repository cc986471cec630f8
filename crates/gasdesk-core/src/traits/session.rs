//! Session persistence trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Session;

/// Holds and transports the bearer token.
///
/// Implementations exist for in-process state, a file on disk (CLI), and
/// the browser cookie jar (web host). None of them inspect the token.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Persist `token`, replacing any existing session.
    async fn create_session(&self, token: &str) -> AppResult<()>;

    /// Read the current session, or `None` when absent.
    async fn get_session(&self) -> AppResult<Option<Session>>;

    /// Remove the session. Removing an absent session is not an error.
    async fn delete_session(&self) -> AppResult<()>;
}
