use porter_core::updates::IssuePatchBuilder;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::issue::list;
use crate::commands::shared::parse::{parse_priority, parse_status};
use crate::context::AppContext;
use crate::output::output;

pub struct EditArgs<'a> {
    pub title: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub category: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub status: Option<&'a str>,
}

#[derive(Serialize)]
struct IssueDeleteResponse<'a> {
    deleted: &'a str,
}

/// `porter issue status <id> <label>`. The label is validated here; the
/// slice then refreshes the building's issues in the background.
pub async fn status(
    id: &str,
    label: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = parse_status(label)?;
    let building_id = list::load(ctx).await?;
    let issue = ctx
        .store
        .issues
        .update_status(id, status.label(), Some(building_id))
        .await
        .map_err(|failure| ctx.op_error(failure))?;
    output(&issue, flags.format)
}

pub async fn edit(
    id: &str,
    args: EditArgs<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut builder = IssuePatchBuilder::new();
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    if let Some(summary) = args.summary {
        builder = builder.summary(summary);
    }
    if let Some(category) = args.category {
        builder = builder.category(category);
    }
    if let Some(priority) = args.priority {
        builder = builder.priority(parse_priority(priority)?);
    }
    if let Some(status) = args.status {
        builder = builder.status(parse_status(status)?);
    }
    let patch = builder.build();
    if patch.is_empty() {
        anyhow::bail!("issue edit: pass at least one of --title, --summary, --category, --priority, --status");
    }

    list::load(ctx).await?;
    let issue = ctx
        .store
        .issues
        .edit(id, patch)
        .await
        .map_err(|failure| ctx.op_error(failure))?;
    output(&issue, flags.format)
}

pub async fn delete(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.store
        .issues
        .delete(id)
        .await
        .map_err(|failure| ctx.op_error(failure))?;
    output(&IssueDeleteResponse { deleted: id }, flags.format)
}
