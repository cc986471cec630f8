//! Edge redirect filter.
//!
//! Runs before every page handler and sees only the path and the cookies.
//! It never validates the token: a present cookie is enough to pass, and a
//! bad one is caught later by the resolver.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use gasdesk_auth::routes;
use gasdesk_core::config::AppConfig;

use crate::state::WebState;

/// What the filter does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    /// Continue to the handler.
    Pass,
    /// Answer with a redirect to the given path.
    Redirect(String),
}

/// Decide for `path` given whether a session cookie is present.
pub fn decide(config: &AppConfig, path: &str, has_cookie: bool) -> EdgeDecision {
    if !has_cookie && routes::is_under_any(path, &config.edge.protected_prefixes) {
        return EdgeDecision::Redirect(config.auth.login_path.clone());
    }
    if has_cookie && routes::is_under(path, &config.auth.login_path) {
        return EdgeDecision::Redirect(config.auth.landing_path.clone());
    }
    EdgeDecision::Pass
}

/// Axum middleware applying [`decide`].
///
/// `GET` and `HEAD` are answered with `307 Temporary Redirect`; every other
/// method gets `303 See Other` so the browser follows up with a `GET`.
pub async fn edge_redirect(
    State(state): State<WebState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let has_cookie = jar
        .get(&state.config.session.cookie_name)
        .is_some_and(|c| !c.value().is_empty());

    match decide(&state.config, request.uri().path(), has_cookie) {
        EdgeDecision::Pass => next.run(request).await,
        EdgeDecision::Redirect(to) => {
            debug!(path = %request.uri().path(), to = %to, has_cookie, "Edge redirect");
            redirect_for(request.method(), &to).into_response()
        }
    }
}

fn redirect_for(method: &Method, to: &str) -> Redirect {
    if method == Method::GET || method == Method::HEAD {
        Redirect::temporary(to)
    } else {
        Redirect::to(to)
    }
}
