//! # gasdesk-core
//!
//! Core crate for the GasDesk console. Contains configuration schemas,
//! identity types returned by the remote API, the session and identity
//! provider traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other GasDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
