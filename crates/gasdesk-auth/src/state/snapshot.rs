//! Immutable views of the auth state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use gasdesk_core::types::User;

use crate::permission::{PermissionEvaluator, PermissionSet};

/// Whether the current identity is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// A resolution is in flight and none has completed yet.
    Loading,
    /// The API accepted the session; a user is held.
    Authenticated,
    /// No valid session; no user is held.
    Unauthenticated,
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStatus::Loading => write!(f, "loading"),
            AuthStatus::Authenticated => write!(f, "authenticated"),
            AuthStatus::Unauthenticated => write!(f, "unauthenticated"),
        }
    }
}

/// A resolved user with its role's permissions parsed into grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedUser {
    user: User,
    /// `None` when the role carried no permission list at all.
    permissions: Option<PermissionSet>,
}

impl AuthorizedUser {
    /// Parse the role's permission records once.
    pub fn from_user(user: User) -> Self {
        let permissions = user
            .role
            .permissions
            .as_deref()
            .map(PermissionSet::from_records);
        Self { user, permissions }
    }

    /// The user as returned by the API.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The role's name.
    pub fn role_name(&self) -> &str {
        &self.user.role.role_name
    }

    /// The role's grants, if the role carried a permission list.
    pub fn permissions(&self) -> Option<&PermissionSet> {
        self.permissions.as_ref()
    }
}

/// Status and user, always consistent with each other.
///
/// `user` is present exactly when `status` is `Authenticated`. The fields
/// are private; only the constructors below build snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    status: AuthStatus,
    user: Option<Arc<AuthorizedUser>>,
    generation: u64,
}

impl AuthSnapshot {
    pub(crate) fn loading(generation: u64) -> Self {
        Self {
            status: AuthStatus::Loading,
            user: None,
            generation,
        }
    }

    pub(crate) fn authenticated(user: Arc<AuthorizedUser>, generation: u64) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user: Some(user),
            generation,
        }
    }

    pub(crate) fn unauthenticated(generation: u64) -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            user: None,
            generation,
        }
    }

    /// Current status.
    pub fn status(&self) -> AuthStatus {
        self.status
    }

    /// The held user, present only when authenticated.
    pub fn user(&self) -> Option<&AuthorizedUser> {
        self.user.as_deref()
    }

    /// Sign-out counter; bumped by every explicit logout.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a resolution is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Loading
    }

    /// Evaluate `required` against the held user.
    pub fn can(&self, evaluator: &PermissionEvaluator, required: Option<&str>) -> bool {
        evaluator.check_permission(self.user(), required)
    }
}
