//! Core traits defined in `gasdesk-core` and implemented by other crates.

pub mod identity;
pub mod session;

pub use identity::IdentityProvider;
pub use session::SessionStore;
