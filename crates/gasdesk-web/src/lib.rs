//! # gasdesk-web
//!
//! Server-rendered web front for the GasDesk console built on Axum.
//!
//! Provides the edge redirect filter, the cookie-backed session store, the
//! login/logout flow, the per-request auth context, and the
//! permission-guarded console pages.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod session;
pub mod state;
pub mod views;

pub use app::{build_app, run_server};
pub use state::WebState;
