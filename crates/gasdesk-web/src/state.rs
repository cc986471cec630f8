//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use gasdesk_auth::{AuthController, CurrentUserResolver};
use gasdesk_core::config::AppConfig;
use gasdesk_core::traits::IdentityProvider;

/// State passed to every Axum handler via `State<WebState>`.
///
/// The resolver is shared so that concurrent requests carrying the same
/// session reuse one `/auth/me` call. Auth state itself is per request.
#[derive(Debug, Clone)]
pub struct WebState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The backend API.
    pub provider: Arc<dyn IdentityProvider>,
    /// Deduplicating current-user resolver.
    pub resolver: Arc<CurrentUserResolver>,
}

impl WebState {
    /// Wire state around an identity provider.
    pub fn new(config: AppConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        let resolver = Arc::new(CurrentUserResolver::new(
            Arc::clone(&provider),
            &config.resolver,
        ));
        Self {
            config: Arc::new(config),
            provider,
            resolver,
        }
    }

    /// A controller with a fresh auth state for one request.
    pub fn controller(&self) -> AuthController {
        AuthController::new(
            Arc::clone(&self.resolver),
            Arc::clone(&self.provider),
            &self.config,
        )
    }
}
