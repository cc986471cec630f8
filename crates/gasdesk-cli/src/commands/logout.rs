//! `gasdesk logout`

use std::process::ExitCode;

use gasdesk_core::error::AppError;
use gasdesk_core::traits::SessionStore;

use super::CliContext;
use crate::output;

/// Execute logout. Succeeds when no session is stored.
pub async fn execute(ctx: &CliContext) -> Result<ExitCode, AppError> {
    let had_session = ctx.sessions.get_session().await?.is_some();
    ctx.controller.logout(&ctx.sessions).await?;

    if had_session {
        output::print_success("Logged out");
    } else {
        output::print_warning("No stored session");
    }
    Ok(ExitCode::SUCCESS)
}
