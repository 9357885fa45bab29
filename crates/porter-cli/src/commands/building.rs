use crate::cli::GlobalFlags;
use crate::cli::subcommands::BuildingCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `porter building`.
pub async fn handle(
    action: &BuildingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let building = match action {
        BuildingCommands::Show => ctx.ensure_building().await?,
        BuildingCommands::Refresh => ctx.refresh_building().await?,
    };
    output(&building, flags.format)
}
