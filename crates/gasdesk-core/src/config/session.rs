//! Session cookie configuration.

use serde::{Deserialize, Serialize};

use super::app::Environment;

/// Session token persistence settings.
///
/// The cookie is deliberately readable by client script, so `http_only`
/// is never set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie name carrying the bearer token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Cookie max age in days.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,
    /// Cookie path.
    #[serde(default = "default_path")]
    pub path: String,
    /// Explicit `Secure` flag. When unset, the flag follows the environment.
    #[serde(default)]
    pub secure: Option<bool>,
    /// File the CLI persists its session into.
    #[serde(default = "default_file")]
    pub file: String,
}

impl SessionConfig {
    /// Whether the session cookie must carry the `Secure` attribute.
    pub fn is_secure(&self, environment: Environment) -> bool {
        self.secure
            .unwrap_or(environment == Environment::Production)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            max_age_days: default_max_age_days(),
            path: default_path(),
            secure: None,
            file: default_file(),
        }
    }
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

fn default_max_age_days() -> i64 {
    7
}

fn default_path() -> String {
    "/".to_string()
}

fn default_file() -> String {
    ".gasdesk/session.json".to_string()
}
