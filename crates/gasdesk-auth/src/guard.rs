//! Render decision for permission-gated views.

use serde::{Deserialize, Serialize};

use crate::permission::PermissionEvaluator;
use crate::state::AuthSnapshot;

/// What a guarded view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Identity not known yet: a placeholder, never the content or a denial.
    Skeleton,
    /// Show the protected content.
    Render,
    /// Show the fixed access-denied view in place of the content.
    Denied,
}

/// Wraps a view that requires a permission.
///
/// The guard only decides what to render. It never navigates and never
/// fails; a denial is an ordinary outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGuard {
    required: Option<String>,
}

impl RouteGuard {
    /// Guard requiring `required` (`None` for an ungated view).
    pub fn new(required: Option<&str>) -> Self {
        Self {
            required: required.map(str::to_string),
        }
    }

    /// Guard requiring the given permission name.
    pub fn requiring(required: &str) -> Self {
        Self::new(Some(required))
    }

    /// The required permission, if any.
    pub fn required(&self) -> Option<&str> {
        self.required.as_deref()
    }

    /// Decide against the given state.
    pub fn evaluate(&self, snapshot: &AuthSnapshot, evaluator: &PermissionEvaluator) -> GuardOutcome {
        if snapshot.is_loading() {
            return GuardOutcome::Skeleton;
        }
        if snapshot.can(evaluator, self.required()) {
            GuardOutcome::Render
        } else {
            GuardOutcome::Denied
        }
    }

    /// Produce the view for the outcome. Only the chosen branch is built.
    pub fn wrap<T>(
        &self,
        snapshot: &AuthSnapshot,
        evaluator: &PermissionEvaluator,
        children: impl FnOnce() -> T,
        skeleton: impl FnOnce() -> T,
        denied: impl FnOnce() -> T,
    ) -> T {
        match self.evaluate(snapshot, evaluator) {
            GuardOutcome::Skeleton => skeleton(),
            GuardOutcome::Render => children(),
            GuardOutcome::Denied => denied(),
        }
    }
}
