//! Current-user resolver configuration.

use serde::{Deserialize, Serialize};

/// Cache and retry behavior for the `/auth/me` resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// How long a resolved identity is reused before it is fetched again.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Maximum number of distinct sessions kept in the cache.
    #[serde(default = "default_capacity")]
    pub max_capacity: u64,
    /// Extra attempts after a transient failure. Auth failures never retry.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Pause between attempts in milliseconds.
    #[serde(default = "default_retry_interval")]
    pub retry_interval_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            max_capacity: default_capacity(),
            retry_attempts: default_retry_attempts(),
            retry_interval_ms: default_retry_interval(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}

fn default_capacity() -> u64 {
    10_000
}

fn default_retry_attempts() -> u32 {
    2
}

fn default_retry_interval() -> u64 {
    500
}
