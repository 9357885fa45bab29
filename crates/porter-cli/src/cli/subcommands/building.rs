use clap::Subcommand;

/// Building commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BuildingCommands {
    /// Show the signed-in user's building.
    Show,
    /// Refetch the building, retrying after a failure.
    Refresh,
}
