//! Deduplicating `/auth/me` resolver.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use tracing::{debug, info, warn};

use gasdesk_core::config::ResolverConfig;
use gasdesk_core::error::AppError;
use gasdesk_core::result::AppResult;
use gasdesk_core::traits::{IdentityProvider, SessionStore};
use gasdesk_core::types::{Session, User};

use super::keys;

/// A successfully resolved identity and when it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// The user returned by the API.
    pub user: User,
    /// Fetch completion time.
    pub resolved_at: DateTime<Utc>,
}

/// Resolves the session's owner through the identity provider.
///
/// Entries are keyed by a digest of the session token, so every consumer
/// of the same session shares one in-flight request and its result.
/// Failures are never cached. Transient failures are retried a bounded
/// number of times; authentication failures are returned immediately.
#[derive(Debug, Clone)]
pub struct CurrentUserResolver {
    /// The remote API.
    provider: Arc<dyn IdentityProvider>,
    /// Token digest → last successful resolution.
    cache: Cache<String, Arc<ResolvedIdentity>>,
    /// Retry settings.
    config: ResolverConfig,
}

impl CurrentUserResolver {
    /// Create a resolver from configuration.
    pub fn new(provider: Arc<dyn IdentityProvider>, config: &ResolverConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.ttl_seconds))
            .build();

        Self {
            provider,
            cache,
            config: config.clone(),
        }
    }

    /// Resolve the user behind the session currently in `sessions`.
    ///
    /// Returns an authentication error when no session exists. The store is
    /// read once; see [`resolve_session`](Self::resolve_session).
    pub async fn resolve(&self, sessions: &dyn SessionStore) -> AppResult<Arc<ResolvedIdentity>> {
        let session = sessions
            .get_session()
            .await?
            .ok_or_else(|| AppError::authentication("No active session"))?;
        self.resolve_session(&session).await
    }

    /// Resolve the user behind `session`.
    ///
    /// Every attempt, retries included, uses this token, and the result is
    /// cached under it alone.
    pub async fn resolve_session(&self, session: &Session) -> AppResult<Arc<ResolvedIdentity>> {
        let key = keys::current_user(&session.token);

        self.cache
            .try_get_with(key, self.fetch(session))
            .await
            .map_err(|e| e.as_ref().clone())
    }

    /// Last successful resolution for `token`, without fetching.
    pub async fn cached(&self, token: &str) -> Option<Arc<ResolvedIdentity>> {
        self.cache.get(&keys::current_user(token)).await
    }

    /// Drop the cached identity for `token`; the next resolve refetches.
    pub async fn invalidate(&self, token: &str) {
        self.cache.invalidate(&keys::current_user(token)).await;
        debug!(session = %keys::token_fingerprint(token), "Current user invalidated");
    }

    /// Drop every cached identity.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        info!("All cached identities invalidated");
    }

    async fn fetch(&self, session: &Session) -> AppResult<Arc<ResolvedIdentity>> {
        let fingerprint = keys::token_fingerprint(&session.token);
        let mut attempt = 0u32;
        loop {
            match self.provider.current_user(session).await {
                Ok(user) => {
                    debug!(session = %fingerprint, user_id = user.id, role = %user.role.role_name, "Current user resolved");
                    return Ok(Arc::new(ResolvedIdentity {
                        user,
                        resolved_at: Utc::now(),
                    }));
                }
                Err(e) if e.is_retryable() && attempt < self.config.retry_attempts => {
                    attempt += 1;
                    warn!(
                        session = %fingerprint,
                        attempt,
                        error = %e,
                        "Current user resolution failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(self.config.retry_interval_ms)).await;
                }
                Err(e) => {
                    warn!(session = %fingerprint, error = %e, "Current user resolution failed");
                    return Err(e);
                }
            }
        }
    }
}
