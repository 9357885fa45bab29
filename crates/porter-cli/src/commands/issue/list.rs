use porter_core::entities::Issue;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::commands::shared::parse::{parse_priority, parse_status};
use crate::context::AppContext;
use crate::output::output_rows;

pub async fn run(
    status: Option<&str>,
    category: Option<&str>,
    priority: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let building_id = ctx.building_id().await?;
    let issues = &ctx.store.issues;

    let fetched = if let Some(status) = status {
        issues.fetch_by_status(building_id, parse_status(status)?).await
    } else if let Some(category) = category {
        issues.fetch_by_category(building_id, category).await
    } else if let Some(priority) = priority {
        issues
            .fetch_by_priority(building_id, parse_priority(priority)?)
            .await
    } else {
        issues.fetch_for_building(building_id).await
    };
    fetched.map_err(|failure| ctx.op_error(failure))?;

    let mut items = issues.items();
    truncate(&mut items, limit);
    output_rows(&items, flags.format)
}

/// Fetch the building's issues into the slice. Returns the building id.
pub async fn load(ctx: &AppContext) -> anyhow::Result<u64> {
    let building_id = ctx.building_id().await?;
    ctx.store
        .issues
        .fetch_for_building(building_id)
        .await
        .map_err(|failure| ctx.op_error(failure))?;
    Ok(building_id)
}

pub async fn find(id: &str, ctx: &AppContext) -> anyhow::Result<Issue> {
    load(ctx).await?;
    ctx.store
        .issues
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("issue {id} not found"))
}
