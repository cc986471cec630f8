//! Route definitions for the GasDesk web front.
//!
//! Every route sits behind the edge redirect filter, which sees only the
//! path and cookies. Guarded pages then resolve the identity themselves.

use axum::{Router, middleware as axum_middleware, routing::get, routing::post};

use crate::extractors::AuthContext;
use crate::handlers;
use crate::handlers::pages::PAGES;
use crate::middleware;
use crate::state::WebState;

/// Build the router with all routes, the edge filter, and request logging.
pub fn build_router(state: WebState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(page_routes())
        .merge(api_routes())
        .route("/health", get(handlers::health::health))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::edge::edge_redirect,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Login form, login submission, logout.
fn auth_routes() -> Router<WebState> {
    Router::new()
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", post(handlers::auth::logout))
}

/// `/` and every guarded console page.
fn page_routes() -> Router<WebState> {
    PAGES.iter().fold(
        Router::new().route("/", get(handlers::pages::root)),
        |router, page| {
            router.route(
                page.path,
                get(move |ctx: AuthContext| handlers::pages::render(ctx, page)),
            )
        },
    )
}

/// JSON endpoints for client-side hydration.
fn api_routes() -> Router<WebState> {
    Router::new().route("/api/session", get(handlers::session::current_session))
}
