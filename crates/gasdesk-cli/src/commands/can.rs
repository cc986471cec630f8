//! `gasdesk can <permission>`

use std::process::ExitCode;

use clap::Args;

use gasdesk_core::error::AppError;

use super::CliContext;
use crate::output;

/// Arguments for can
#[derive(Debug, Args)]
pub struct CanArgs {
    /// Permission name, `resource:action`
    pub permission: String,
}

/// Execute can. Exit code 0 when granted, 1 when denied.
pub async fn execute(args: &CanArgs, ctx: &CliContext) -> Result<ExitCode, AppError> {
    ctx.resolve().await?;

    if ctx.controller.can(Some(&args.permission)) {
        output::print_success(&format!("Granted: {}", args.permission));
        Ok(ExitCode::SUCCESS)
    } else {
        output::print_error(&format!("Denied: {}", args.permission));
        Ok(ExitCode::FAILURE)
    }
}
