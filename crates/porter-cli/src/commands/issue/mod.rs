mod create;
mod list;
mod update;

pub use list::load;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IssueCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `porter issue`.
pub async fn handle(
    action: &IssueCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        IssueCommands::List {
            status,
            category,
            priority,
            limit,
        } => {
            list::run(
                status.as_deref(),
                category.as_deref(),
                priority.as_deref(),
                *limit,
                ctx,
                flags,
            )
            .await
        }
        IssueCommands::Get { id } => {
            let issue = list::find(id, ctx).await?;
            output(&issue, flags.format)
        }
        IssueCommands::Create {
            title,
            summary,
            category,
            priority,
            email,
        } => {
            create::run(
                create::CreateArgs {
                    title,
                    summary,
                    category,
                    priority,
                    email: email.as_deref(),
                },
                ctx,
                flags,
            )
            .await
        }
        IssueCommands::Status { id, label } => update::status(id, label, ctx, flags).await,
        IssueCommands::Edit {
            id,
            title,
            summary,
            category,
            priority,
            status,
        } => {
            update::edit(
                id,
                update::EditArgs {
                    title: title.as_deref(),
                    summary: summary.as_deref(),
                    category: category.as_deref(),
                    priority: priority.as_deref(),
                    status: status.as_deref(),
                },
                ctx,
                flags,
            )
            .await
        }
        IssueCommands::Delete { id } => update::delete(id, ctx, flags).await,
    }
}
