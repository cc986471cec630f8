//! Resource/action permissions.
//!
//! The wire format is `"<resource>:<action>"`. It is parsed exactly once,
//! when an identity is resolved, into a [`PermissionSet`] keyed by
//! resource. A `manage` grant on a resource subsumes every action on it.

pub mod evaluator;
pub mod grants;
pub mod model;

pub use evaluator::PermissionEvaluator;
pub use grants::{PermissionSet, ResourceGrant};
pub use model::{Action, Permission, Resource};
