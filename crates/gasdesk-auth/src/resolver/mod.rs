//! Current-user resolution with request deduplication.

pub mod current_user;
pub mod keys;

pub use current_user::{CurrentUserResolver, ResolvedIdentity};
