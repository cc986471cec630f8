//! Observable auth state container.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::snapshot::{AuthSnapshot, AuthStatus, AuthorizedUser};

/// Process-wide (per application instance) auth state.
///
/// Every transition replaces status and user together, so no observer can
/// see one without the other. Consumers may [`subscribe`](Self::subscribe)
/// to be woken on each change; transitions that change nothing do not wake
/// them.
#[derive(Debug, Clone)]
pub struct AuthState {
    tx: Arc<watch::Sender<AuthSnapshot>>,
}

impl AuthState {
    /// A fresh state, loading until the first resolution completes.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthSnapshot::loading(0));
        Self { tx: Arc::new(tx) }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every effective transition.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }

    /// Current status.
    pub fn status(&self) -> AuthStatus {
        self.tx.borrow().status()
    }

    /// Current sign-out generation.
    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation()
    }

    /// `unauthenticated → loading`. A no-op when already loading or when a
    /// resolution already produced a user.
    pub fn begin_loading(&self) -> bool {
        self.tx.send_if_modified(|s| {
            if s.status() != AuthStatus::Unauthenticated {
                return false;
            }
            *s = AuthSnapshot::loading(s.generation());
            debug!("Auth state: loading");
            true
        })
    }

    /// Store `user` as authenticated, unless a logout has happened since
    /// `generation` was read. An already-authenticated state has its user
    /// replaced in place.
    pub fn authenticate(&self, user: AuthorizedUser, generation: u64) -> bool {
        self.tx.send_if_modified(|s| {
            if s.generation() != generation {
                debug!(stale = generation, current = s.generation(), "Discarding stale resolution");
                return false;
            }
            if s.user() == Some(&user) {
                return false;
            }
            debug!(user_id = user.user().id, role = %user.role_name(), "Auth state: authenticated");
            *s = AuthSnapshot::authenticated(Arc::new(user), s.generation());
            true
        })
    }

    /// Clear the user and mark the state unauthenticated.
    pub fn sign_out(&self) -> bool {
        self.tx.send_if_modified(|s| {
            if s.status() == AuthStatus::Unauthenticated {
                return false;
            }
            *s = AuthSnapshot::unauthenticated(s.generation());
            debug!("Auth state: unauthenticated");
            true
        })
    }

    /// Explicit logout: sign out and invalidate every in-flight resolution.
    pub fn end_session(&self) {
        self.tx.send_modify(|s| {
            *s = AuthSnapshot::unauthenticated(s.generation() + 1);
        });
        debug!("Auth state: session ended");
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}
