//! Login and logout handlers.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use gasdesk_core::error::{AppError, ErrorKind};
use gasdesk_core::types::Credentials;

use crate::error::{ApiError, status_for};
use crate::session::{CookiePolicy, CookieSessionStore};
use crate::state::WebState;
use crate::views;

/// GET /login
pub async fn login_page() -> Html<String> {
    views::login_form(None, "")
}

/// POST /login
///
/// On success the session cookie is written and the browser is sent to the
/// landing page. Any failure re-renders the form with a message.
pub async fn login(
    State(state): State<WebState>,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> Response {
    let sessions = CookieSessionStore::new(jar, CookiePolicy::from_config(&state.config));
    let controller = state.controller();

    let failure = match controller.login(&credentials, &sessions).await {
        Ok(outcome) => outcome.error,
        Err(err) => Some(err),
    };

    match failure {
        None => (
            sessions.into_jar(),
            Redirect::to(&state.config.auth.landing_path),
        )
            .into_response(),
        Some(err) => {
            info!(username = %credentials.username, kind = %err.kind, "Login failed");
            (
                status_for(err.kind),
                sessions.into_jar(),
                views::login_form(Some(&login_message(&err)), &credentials.username),
            )
                .into_response()
        }
    }
}

/// Text shown above the form for a failed login.
fn login_message(err: &AppError) -> String {
    match err.kind {
        ErrorKind::Transport => {
            "The GasDesk service could not be reached. Please try again.".to_string()
        }
        ErrorKind::Server => "The GasDesk service ran into a problem. Please try again.".to_string(),
        ErrorKind::Validation if err.status.is_none() => {
            "Enter your username and password.".to_string()
        }
        _ => err.message.clone(),
    }
}

/// POST /logout
pub async fn logout(State(state): State<WebState>, jar: CookieJar) -> Result<Response, ApiError> {
    let sessions = CookieSessionStore::new(jar, CookiePolicy::from_config(&state.config));
    state.controller().logout(&sessions).await?;
    Ok((sessions.into_jar(), Redirect::to(&state.config.auth.login_path)).into_response())
}
