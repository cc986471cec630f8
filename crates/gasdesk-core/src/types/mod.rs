//! Core type definitions used across the GasDesk workspace.

pub mod identity;
pub mod session;

pub use identity::{Credentials, LoginResponse, PermissionRecord, Role, User};
pub use session::Session;
