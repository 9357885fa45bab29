use porter_core::entities::AnnualFinance;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FinanceCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AnnualResponse {
    #[serde(flatten)]
    finance: AnnualFinance,
    balance: f64,
}

#[derive(Serialize)]
struct Unavailable {
    available: bool,
    note: &'static str,
}

/// Handle `porter finance`.
pub async fn handle(
    action: &FinanceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let FinanceCommands::Annual { year } = action;

    if ctx.is_example() {
        return output(
            &Unavailable {
                available: false,
                note: "finance data is not part of the example dataset",
            },
            flags.format,
        );
    }

    let finance = ctx
        .client
        .annual_finance(*year)
        .await
        .map_err(|error| ctx.api_error(&error))?;
    let balance = finance.balance();
    output(&AnnualResponse { finance, balance }, flags.format)
}
