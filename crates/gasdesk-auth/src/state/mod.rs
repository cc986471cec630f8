//! Auth state container and the controller that drives it.

pub mod controller;
pub mod snapshot;
pub mod store;

pub use controller::{AuthController, AuthOutcome, ResolverSignal};
pub use snapshot::{AuthSnapshot, AuthStatus, AuthorizedUser};
pub use store::AuthState;
