//! Cache key builders for resolver entries.
//!
//! Tokens never appear in keys or logs; only their SHA-256 digest does.

use sha2::{Digest, Sha256};

/// Prefix applied to all GasDesk cache keys.
const PREFIX: &str = "gasdesk";

/// Resource the current-user entries are cached under.
pub const CURRENT_USER_RESOURCE: &str = "auth:me";

/// Hex SHA-256 digest of a session token.
pub fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Short digest prefix safe to put in log fields.
pub fn token_fingerprint(token: &str) -> String {
    token_digest(token)[..12].to_string()
}

/// Cache key for the identity behind a session token.
pub fn current_user(token: &str) -> String {
    format!("{PREFIX}:{CURRENT_USER_RESOURCE}:{}", token_digest(token))
}
