//! Axum middleware stack.

pub mod cors;
pub mod edge;
pub mod logging;
