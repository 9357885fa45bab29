use porter_core::entities::{Email, Issue};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EmailCommands;
use crate::commands::issue;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::commands::shared::parse::parse_email_status;
use crate::context::AppContext;
use crate::output::{output, output_rows};

#[derive(Serialize)]
struct LinkResponse {
    email: Email,
    issue: Issue,
}

/// Handle `porter email`.
pub async fn handle(
    action: &EmailCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EmailCommands::List { status, limit } => {
            let status = status.as_deref().map(parse_email_status).transpose()?;
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            ctx.store
                .emails
                .load()
                .await
                .map_err(|failure| ctx.op_error(failure))?;

            let mut emails = ctx.store.emails.items();
            if let Some(status) = status {
                emails.retain(|email| email.status == status);
            }
            truncate(&mut emails, limit);
            output_rows(&emails, flags.format)
        }
        EmailCommands::Link { email_id, issue_id } => {
            ctx.store
                .emails
                .load()
                .await
                .map_err(|failure| ctx.op_error(failure))?;
            issue::load(ctx).await?;

            let (email, issue) = ctx
                .store
                .link_email_to_issue(email_id, issue_id)
                .map_err(|failure| ctx.op_error(failure))?;
            output(&LinkResponse { email, issue }, flags.format)
        }
    }
}
