//! `AuthContext` extractor: reads the session cookie, resolves the current
//! user, and hands the handler a settled auth state.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use gasdesk_auth::{AuthController, AuthOutcome, AuthSnapshot, GuardOutcome};
use gasdesk_core::error::AppError;

use crate::error::status_for;
use crate::session::{CookiePolicy, CookieSessionStore};
use crate::state::WebState;
use crate::views;

/// Per-request auth state after one resolution.
///
/// Extraction never fails: a failed resolution is part of the context and
/// handlers decide how to answer it, usually via [`AuthContext::failure_response`].
#[derive(Debug)]
pub struct AuthContext {
    controller: AuthController,
    sessions: CookieSessionStore,
    outcome: AuthOutcome,
    login_path: String,
}

impl AuthContext {
    /// The controller holding this request's state.
    pub fn controller(&self) -> &AuthController {
        &self.controller
    }

    /// State after resolution.
    pub fn snapshot(&self) -> &AuthSnapshot {
        &self.outcome.snapshot
    }

    /// The resolution failure, if any.
    pub fn error(&self) -> Option<&AppError> {
        self.outcome.error.as_ref()
    }

    /// Render decision for a view requiring `required`.
    pub fn guard(&self, required: Option<&str>) -> GuardOutcome {
        self.controller.guard(required)
    }

    /// Whether the current user holds `required`.
    pub fn can(&self, required: Option<&str>) -> bool {
        self.controller.can(required)
    }

    /// The cookie jar including any session deletion made while resolving.
    pub fn jar(&self) -> CookieJar {
        self.sessions.jar()
    }

    /// The response for a failed resolution, or `None` if it succeeded.
    ///
    /// Authentication failures carry the cookie deletion and redirect to the
    /// login page. Transport and server failures keep the cookie and answer
    /// with a notice page.
    pub fn failure_response(&self) -> Option<Response> {
        let err = self.error()?;
        let jar = self.jar();
        if err.is_authentication() {
            let to = self
                .outcome
                .redirect
                .clone()
                .unwrap_or_else(|| self.login_path.clone());
            return Some((jar, Redirect::temporary(&to)).into_response());
        }
        Some((status_for(err.kind), jar, views::notice(err.kind)).into_response())
    }
}

impl FromRequestParts<WebState> for AuthContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &WebState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let sessions = CookieSessionStore::new(jar, CookiePolicy::from_config(&state.config));
        let controller = state.controller();

        let outcome = controller.refresh(&sessions, parts.uri.path()).await;
        if let Some(err) = &outcome.error {
            debug!(path = %parts.uri.path(), kind = %err.kind, "Identity resolution failed");
        }

        Ok(Self {
            controller,
            sessions,
            outcome,
            login_path: state.config.auth.login_path.clone(),
        })
    }
}
