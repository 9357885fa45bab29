use clap::Subcommand;

/// Issue commands.
#[derive(Clone, Debug, Subcommand)]
pub enum IssueCommands {
    /// List issues for the building.
    List {
        /// Status label, e.g. "In progress".
        #[arg(long, conflicts_with_all = ["category", "priority"])]
        status: Option<String>,
        #[arg(long, conflicts_with = "priority")]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an issue by ID.
    Get { id: String },
    /// Create an issue.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        summary: String,
        #[arg(long, default_value = "General")]
        category: String,
        #[arg(long, default_value = "Medium")]
        priority: String,
        /// Email the issue was raised from.
        #[arg(long)]
        email: Option<String>,
    },
    /// Change an issue's status by label.
    Status { id: String, label: String },
    /// Edit issue fields.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete an issue.
    Delete { id: String },
}
