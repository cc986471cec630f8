//! Identity provider trait: the remote API as seen by the auth core.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{Credentials, LoginResponse, Session, User};

/// The remote endpoints the access layer depends on.
///
/// Errors must keep transport failures distinct from HTTP status failures,
/// and 401/403 must surface as `ErrorKind::Authentication`.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// `POST /auth/login`.
    async fn login(&self, credentials: &Credentials) -> AppResult<LoginResponse>;

    /// `GET /auth/me`, bearer-authenticated with `session`.
    async fn current_user(&self, session: &Session) -> AppResult<User>;
}
