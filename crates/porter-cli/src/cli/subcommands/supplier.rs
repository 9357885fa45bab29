use clap::Subcommand;

/// Supplier commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SupplierCommands {
    /// List suppliers.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Register a supplier.
    Create {
        #[arg(long)]
        name: String,
        /// Service provided, e.g. "Plumbing".
        #[arg(long)]
        service: String,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}
