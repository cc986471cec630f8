//! Session snapshot endpoint for client-side hydration.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use gasdesk_auth::{AuthStatus, Permission};
use gasdesk_core::types::User;

use crate::error::ApiError;
use crate::extractors::AuthContext;

/// Body of `GET /api/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Auth status after resolution.
    pub status: AuthStatus,
    /// The resolved user, when authenticated.
    pub user: Option<User>,
    /// The role's grants as `resource:action` names.
    pub permissions: Vec<Permission>,
}

/// GET /api/session
///
/// An invalid or missing session answers `unauthenticated` (clearing the
/// cookie if the API rejected it). Transport and server failures are errors.
pub async fn current_session(ctx: AuthContext) -> Result<Response, ApiError> {
    if let Some(err) = ctx.error() {
        if !err.is_authentication() {
            return Err(err.clone().into());
        }
    }

    let snapshot = ctx.snapshot();
    let user = snapshot.user();
    let body = SessionResponse {
        status: snapshot.status(),
        user: user.map(|u| u.user().clone()),
        permissions: user
            .and_then(|u| u.permissions())
            .map(|set| set.iter().collect())
            .unwrap_or_default(),
    };

    Ok((ctx.jar(), Json(body)).into_response())
}
