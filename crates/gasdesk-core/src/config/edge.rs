//! Edge redirect filter configuration.

use serde::{Deserialize, Serialize};

/// Paths that require a session cookie before any page renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Protected path prefixes, matched on whole path segments.
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: default_protected_prefixes(),
        }
    }
}

fn default_protected_prefixes() -> Vec<String> {
    [
        "/dashboard",
        "/users",
        "/customers",
        "/suppliers",
        "/products",
        "/orders",
        "/deliveries",
        "/gas-conversions",
        "/warehouse",
        "/audits",
        "/return-receipts",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
