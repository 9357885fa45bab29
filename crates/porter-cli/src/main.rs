use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

/// Exit code for a command the backend refused because the session ended.
const EXIT_SESSION_EXPIRED: i32 = 2;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        if let Some(expired) = error.downcast_ref::<commands::shared::SessionExpired>() {
            eprintln!("porter: {expired}");
            eprintln!("Run `porter auth login` to sign in again.");
            std::process::exit(EXIT_SESSION_EXPIRED);
        }
        eprintln!("porter error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = bootstrap::load_config()?;
    let ctx = context::AppContext::init(config, &flags)?;

    let result = commands::dispatch::dispatch(cli.command, &ctx, &flags).await;
    ctx.settle().await;
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PORTER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
