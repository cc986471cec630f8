//! CLI command definitions and dispatch.

pub mod can;
pub mod config;
pub mod login;
pub mod logout;
pub mod permissions;
pub mod whoami;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use gasdesk_auth::{AuthController, AuthOutcome, CurrentUserResolver, FileSessionStore};
use gasdesk_client::ApiClient;
use gasdesk_core::config::AppConfig;
use gasdesk_core::error::AppError;

use crate::output::OutputFormat;

/// GasDesk operator client for the gas cylinder logistics console
#[derive(Debug, Parser)]
#[command(name = "gasdesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay to load from `config/{env}.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session locally
    Login(login::LoginArgs),
    /// End the stored session
    Logout,
    /// Show the user behind the stored session
    Whoami,
    /// Check a permission; exits 0 when granted, 1 when denied
    Can(can::CanArgs),
    /// List the permissions of the current role
    Permissions,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<ExitCode, AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &self.config, &self.env, self.format).await;
        }

        let ctx = CliContext::load(&self.config, &self.env)?;
        match &self.command {
            Commands::Login(args) => login::execute(args, &ctx).await,
            Commands::Logout => logout::execute(&ctx).await,
            Commands::Whoami => whoami::execute(&ctx, self.format).await,
            Commands::Can(args) => can::execute(args, &ctx).await,
            Commands::Permissions => permissions::execute(&ctx, self.format).await,
            Commands::Config(_) => Ok(ExitCode::SUCCESS),
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str, env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path, env)
}

/// Everything a session command needs: the controller and the session file.
#[derive(Debug)]
pub struct CliContext {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Auth state for this process.
    pub controller: AuthController,
    /// The persisted session.
    pub sessions: FileSessionStore,
}

impl CliContext {
    /// Load configuration and wire the API client, resolver, and controller.
    pub fn load(config_path: &str, env: &str) -> Result<Self, AppError> {
        let config = load_config(config_path, env)?;
        let client = Arc::new(ApiClient::new(&config.api)?);
        let resolver = Arc::new(CurrentUserResolver::new(client.clone(), &config.resolver));
        let controller = AuthController::new(resolver, client, &config);
        let sessions = FileSessionStore::from_config(&config.session);
        Ok(Self {
            config,
            controller,
            sessions,
        })
    }

    /// Resolve the stored session, failing on any resolution error.
    pub async fn resolve(&self) -> Result<AuthOutcome, AppError> {
        let outcome = self
            .controller
            .refresh(&self.sessions, &self.config.auth.landing_path)
            .await;
        match outcome.error {
            Some(err) => Err(err),
            None => Ok(outcome),
        }
    }
}
