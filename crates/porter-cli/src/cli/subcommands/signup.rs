use clap::Subcommand;

/// Registration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SignupCommands {
    /// Create a user account.
    User {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PORTER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register a building.
    Building {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        postcode: Option<String>,
        /// Number of units in the building.
        #[arg(long)]
        units: u32,
    },
    /// Invite someone to the current building.
    Invite {
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: Option<String>,
    },
}
