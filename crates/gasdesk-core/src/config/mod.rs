//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so an empty file is valid.

pub mod api;
pub mod app;
pub mod auth;
pub mod edge;
pub mod logging;
pub mod resolver;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::app::{CorsConfig, Environment, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::edge::EdgeConfig;
pub use self::logging::LoggingConfig;
pub use self::resolver::ResolverConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (base file + environment overlay + env vars).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote REST API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session cookie settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Login / landing paths and the super-admin sentinel.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Current-user resolver cache settings.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Edge redirect filter settings.
    #[serde(default)]
    pub edge: EdgeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the base file at `path` with an optional `config/{env}`
    /// overlay and environment variables prefixed with `GASDESK__`.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GASDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("edge.protected_prefixes")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Whether the server runs with production hardening (secure cookies).
    pub fn is_production(&self) -> bool {
        self.server.environment == Environment::Production
    }
}
