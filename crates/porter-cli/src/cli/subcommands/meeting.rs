use clap::Subcommand;

/// Meeting commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MeetingCommands {
    /// List meetings.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show calendar events.
    Calendar {
        #[arg(long)]
        limit: Option<u32>,
    },
}
