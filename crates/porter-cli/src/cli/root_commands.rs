use clap::Subcommand;

use crate::cli::subcommands::{
    AuthCommands, BuildingCommands, DocumentCommands, EmailCommands, FinanceCommands,
    IssueCommands, MeetingCommands, SignupCommands, SupplierCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, session status.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Register a user or building, invite members.
    Signup {
        #[command(subcommand)]
        action: SignupCommands,
    },
    /// The current building.
    Building {
        #[command(subcommand)]
        action: BuildingCommands,
    },
    /// Issues.
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// Inbound emails.
    Email {
        #[command(subcommand)]
        action: EmailCommands,
    },
    /// Meetings and the building calendar.
    Meeting {
        #[command(subcommand)]
        action: MeetingCommands,
    },
    /// Suppliers.
    Supplier {
        #[command(subcommand)]
        action: SupplierCommands,
    },
    /// Building finances.
    Finance {
        #[command(subcommand)]
        action: FinanceCommands,
    },
    /// Building documents.
    Document {
        #[command(subcommand)]
        action: DocumentCommands,
    },
}
