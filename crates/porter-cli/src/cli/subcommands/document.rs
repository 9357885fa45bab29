use std::path::PathBuf;

use clap::Subcommand;

/// Document commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DocumentCommands {
    /// Upload a file.
    Upload { path: PathBuf },
    /// Get a viewing link.
    View { id: String },
    /// Download a document.
    Download {
        id: String,
        /// Destination file (default: stdout).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
