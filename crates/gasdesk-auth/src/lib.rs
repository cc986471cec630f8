//! # gasdesk-auth
//!
//! The access core of the GasDesk console: everything between a session
//! token and the decision to render a page.
//!
//! ## Modules
//!
//! - `session` - in-process and file-backed session stores
//! - `resolver` - deduplicating `/auth/me` resolution cache
//! - `state` - auth status / user container and the controller driving it
//! - `permission` - typed `resource:action` grants and the evaluator
//! - `guard` - render decision for a protected view
//! - `routes` - path-prefix matching shared with the edge filter

pub mod guard;
pub mod permission;
pub mod resolver;
pub mod routes;
pub mod session;
pub mod state;

pub use guard::{GuardOutcome, RouteGuard};
pub use permission::{Action, Permission, PermissionEvaluator, PermissionSet, Resource};
pub use resolver::{CurrentUserResolver, ResolvedIdentity};
pub use session::{FileSessionStore, MemorySessionStore};
pub use state::{AuthController, AuthOutcome, AuthSnapshot, AuthState, AuthStatus, AuthorizedUser};
