//! `gasdesk whoami`

use std::process::ExitCode;

use gasdesk_core::error::AppError;

use super::CliContext;
use crate::output::{self, OutputFormat};

/// Execute whoami
pub async fn execute(ctx: &CliContext, format: OutputFormat) -> Result<ExitCode, AppError> {
    let outcome = ctx.resolve().await?;
    let user = outcome
        .snapshot
        .user()
        .ok_or_else(|| AppError::authentication("No user resolved"))?;

    match format {
        OutputFormat::Json => output::print_json(user.user()),
        OutputFormat::Table => {
            let u = user.user();
            output::print_kv("ID", &u.id.to_string());
            output::print_kv("Name", &u.name);
            output::print_kv("Email", &u.email);
            output::print_kv("Role", user.role_name());
            let grants = match user.permissions() {
                Some(set) => set.len().to_string(),
                None => "none (no permission list)".to_string(),
            };
            output::print_kv("Permissions", &grants);
        }
    }
    Ok(ExitCode::SUCCESS)
}
