use crate::cli::GlobalFlags;
use crate::cli::subcommands::MeetingCommands;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::commands::shared::load_cached;
use crate::context::AppContext;
use crate::output::output_rows;

/// Handle `porter meeting`.
pub async fn handle(
    action: &MeetingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let fallback = ctx.config.general.default_limit;
    match action {
        MeetingCommands::List { limit } => {
            let mut meetings = load_cached(&ctx.store.meetings, ctx).await?;
            meetings.sort_by_key(|meeting| meeting.scheduled_for);
            truncate(&mut meetings, effective_limit(*limit, flags.limit, fallback));
            output_rows(&meetings, flags.format)
        }
        MeetingCommands::Calendar { limit } => {
            let mut events = load_cached(&ctx.store.calendar, ctx).await?;
            events.sort_by_key(|event| event.starts_at);
            truncate(&mut events, effective_limit(*limit, flags.limit, fallback));
            output_rows(&events, flags.format)
        }
    }
}
