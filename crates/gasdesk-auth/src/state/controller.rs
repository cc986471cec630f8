//! Drives the auth state from resolver results.

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use gasdesk_core::config::AppConfig;
use gasdesk_core::error::AppError;
use gasdesk_core::result::AppResult;
use gasdesk_core::traits::{IdentityProvider, SessionStore};
use gasdesk_core::types::Credentials;

use crate::guard::{GuardOutcome, RouteGuard};
use crate::permission::PermissionEvaluator;
use crate::resolver::{CurrentUserResolver, ResolvedIdentity};
use crate::routes;

use super::snapshot::{AuthSnapshot, AuthorizedUser};
use super::store::AuthState;

/// One observation of the resolver.
#[derive(Debug, Clone)]
pub enum ResolverSignal {
    /// A resolution is in flight.
    Loading,
    /// The resolution failed.
    Failed(AppError),
    /// The resolution produced a user.
    Resolved(Arc<ResolvedIdentity>),
}

/// Result of driving the state through one resolution.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// State after the resolution was applied.
    pub snapshot: AuthSnapshot,
    /// Where the host should navigate, if anywhere.
    pub redirect: Option<String>,
    /// The failure that caused the state to drop, if any.
    pub error: Option<AppError>,
}

/// Owns one application instance's auth state and the collaborators that
/// feed it: the shared resolver, the identity provider for logins, and the
/// permission evaluator.
#[derive(Debug, Clone)]
pub struct AuthController {
    state: AuthState,
    resolver: Arc<CurrentUserResolver>,
    provider: Arc<dyn IdentityProvider>,
    evaluator: PermissionEvaluator,
    login_path: String,
}

impl AuthController {
    /// Create a controller with a fresh auth state.
    pub fn new(
        resolver: Arc<CurrentUserResolver>,
        provider: Arc<dyn IdentityProvider>,
        config: &AppConfig,
    ) -> Self {
        Self {
            state: AuthState::new(),
            resolver,
            provider,
            evaluator: PermissionEvaluator::new(config.auth.super_admin_role.clone()),
            login_path: config.auth.login_path.clone(),
        }
    }

    /// The state this controller drives.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// The permission evaluator in use.
    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    /// Apply one resolver observation while on `current_route`.
    ///
    /// Returns the login path when a failure should navigate there.
    pub fn sync(&self, signal: ResolverSignal, current_route: &str) -> Option<String> {
        self.apply(signal, current_route, self.state.generation())
    }

    fn apply(&self, signal: ResolverSignal, current_route: &str, generation: u64) -> Option<String> {
        match signal {
            ResolverSignal::Loading => {
                self.state.begin_loading();
                None
            }
            ResolverSignal::Failed(e) => {
                self.state.sign_out();
                if routes::is_under(current_route, &self.login_path) {
                    None
                } else {
                    debug!(route = current_route, error = %e, "Redirecting to login");
                    Some(self.login_path.clone())
                }
            }
            ResolverSignal::Resolved(identity) => {
                self.state
                    .authenticate(AuthorizedUser::from_user(identity.user.clone()), generation);
                None
            }
        }
    }

    /// Resolve the session in `sessions` and apply the result.
    ///
    /// The token is captured once. Its resolution is accepted, and an
    /// authentication failure deletes it, only while the store still holds
    /// that token. When another token replaced it meanwhile, the new token
    /// is resolved instead. A resolution that completes after a logout, or
    /// after the session disappeared, does not authenticate anyone.
    pub async fn refresh(&self, sessions: &dyn SessionStore, current_route: &str) -> AuthOutcome {
        let generation = self.state.generation();
        self.apply(ResolverSignal::Loading, current_route, generation);

        let signal = loop {
            let session = match sessions.get_session().await {
                Ok(Some(session)) => session,
                Ok(None) => {
                    break ResolverSignal::Failed(AppError::authentication("No active session"));
                }
                Err(e) => break ResolverSignal::Failed(e),
            };
            let result = self.resolver.resolve_session(&session).await;

            match sessions.get_session().await {
                Ok(Some(current)) if current.token == session.token => {}
                Ok(Some(_)) => {
                    debug!("Session replaced during resolution, resolving the new one");
                    continue;
                }
                Ok(None) => {
                    break ResolverSignal::Failed(AppError::authentication(
                        "Session ended during resolution",
                    ));
                }
                Err(e) => break ResolverSignal::Failed(e),
            }

            match result {
                Ok(identity) => break ResolverSignal::Resolved(identity),
                Err(e) => {
                    if e.is_authentication() {
                        if let Err(delete_err) = sessions.delete_session().await {
                            warn!(error = %delete_err, "Failed to clear rejected session");
                        }
                    }
                    break ResolverSignal::Failed(e);
                }
            }
        };

        let error = match &signal {
            ResolverSignal::Failed(e) => Some(e.clone()),
            _ => None,
        };
        let redirect = self.apply(signal, current_route, generation);

        AuthOutcome {
            snapshot: self.state.snapshot(),
            redirect,
            error,
        }
    }

    /// Log in with `credentials`, persist the issued token, and resolve.
    ///
    /// Invalid credentials are rejected locally without a network call.
    pub async fn login(
        &self,
        credentials: &Credentials,
        sessions: &dyn SessionStore,
    ) -> AppResult<AuthOutcome> {
        credentials
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid login form: {e}")))?;

        let response = self.provider.login(credentials).await?;

        if let Some(previous) = sessions.get_session().await? {
            self.resolver.invalidate(&previous.token).await;
        }
        sessions.create_session(&response.token).await?;
        self.state.begin_loading();
        info!(username = %credentials.username, "Login accepted");

        Ok(self.refresh(sessions, &self.login_path).await)
    }

    /// End the session: clear the token, drop its cached identity, and
    /// discard any resolution still in flight.
    pub async fn logout(&self, sessions: &dyn SessionStore) -> AppResult<AuthSnapshot> {
        if let Some(session) = sessions.get_session().await? {
            self.resolver.invalidate(&session.token).await;
        }
        sessions.delete_session().await?;
        self.state.end_session();
        info!("Logged out");
        Ok(self.state.snapshot())
    }

    /// Evaluate `required` against the current state.
    pub fn can(&self, required: Option<&str>) -> bool {
        self.state.snapshot().can(&self.evaluator, required)
    }

    /// Render decision for a view requiring `required`.
    pub fn guard(&self, required: Option<&str>) -> GuardOutcome {
        RouteGuard::new(required).evaluate(&self.state.snapshot(), &self.evaluator)
    }
}
