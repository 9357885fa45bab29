use clap::Subcommand;

/// Finance commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FinanceCommands {
    /// Annual budget and spend for a year.
    Annual { year: i32 },
}
