use clap::Subcommand;

/// Email commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EmailCommands {
    /// List inbound emails.
    List {
        /// Status label, e.g. "Needs Review".
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Link an email to an issue (both directions).
    Link { email_id: String, issue_id: String },
}
