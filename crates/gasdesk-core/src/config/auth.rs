//! Authentication flow configuration.

use serde::{Deserialize, Serialize};

/// Login/landing routes and the role that bypasses permission checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Role name that is granted every permission unconditionally.
    #[serde(default = "default_super_admin_role")]
    pub super_admin_role: String,
    /// Path of the login page.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Where authenticated visitors land after login.
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            super_admin_role: default_super_admin_role(),
            login_path: default_login_path(),
            landing_path: default_landing_path(),
        }
    }
}

fn default_super_admin_role() -> String {
    "Super Admin".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_landing_path() -> String {
    "/dashboard".to_string()
}
