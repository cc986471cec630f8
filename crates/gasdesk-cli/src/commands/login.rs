//! `gasdesk login`

use std::process::ExitCode;

use clap::Args;

use gasdesk_core::error::AppError;
use gasdesk_core::types::Credentials;

use super::CliContext;
use crate::output;

/// Arguments for login
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account name (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute login
pub async fn execute(args: &LoginArgs, ctx: &CliContext) -> Result<ExitCode, AppError> {
    let username = match &args.username {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let credentials = Credentials { username, password };
    let outcome = ctx.controller.login(&credentials, &ctx.sessions).await?;
    if let Some(err) = outcome.error {
        return Err(err);
    }

    match outcome.snapshot.user() {
        Some(user) => output::print_success(&format!(
            "Logged in as {} ({})",
            user.user().name,
            user.role_name()
        )),
        None => output::print_success("Logged in"),
    }
    output::print_kv("Session file", &ctx.sessions.path().display().to_string());

    Ok(ExitCode::SUCCESS)
}
