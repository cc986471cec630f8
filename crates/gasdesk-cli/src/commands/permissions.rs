//! `gasdesk permissions`

use std::process::ExitCode;

use serde::Serialize;
use tabled::Tabled;

use gasdesk_auth::Permission;
use gasdesk_core::error::AppError;

use super::CliContext;
use crate::output::{self, OutputFormat};

/// Permission display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PermissionRow {
    /// Resource
    resource: String,
    /// Action
    action: String,
    /// Full name
    name: String,
}

impl From<Permission> for PermissionRow {
    fn from(p: Permission) -> Self {
        Self {
            resource: p.resource.to_string(),
            action: p.action.to_string(),
            name: p.to_string(),
        }
    }
}

/// Execute permissions
pub async fn execute(ctx: &CliContext, format: OutputFormat) -> Result<ExitCode, AppError> {
    let outcome = ctx.resolve().await?;
    let Some(user) = outcome.snapshot.user() else {
        return Err(AppError::authentication("No user resolved"));
    };

    if user.role_name() == ctx.controller.evaluator().super_admin_role() {
        output::print_warning(&format!(
            "Role '{}' bypasses every permission check",
            user.role_name()
        ));
    }

    match user.permissions() {
        Some(set) => {
            let rows: Vec<PermissionRow> = set.iter().map(PermissionRow::from).collect();
            output::print_list(&rows, format);
        }
        None => output::print_warning(&format!(
            "Role '{}' carries no permission list; every gated check is denied",
            user.role_name()
        )),
    }
    Ok(ExitCode::SUCCESS)
}
