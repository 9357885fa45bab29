use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if requires_session(&command) {
        ctx.require_session()?;
    }

    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Signup { action } => commands::signup::handle(&action, ctx, flags).await,
        Commands::Building { action } => commands::building::handle(&action, ctx, flags).await,
        Commands::Issue { action } => commands::issue::handle(&action, ctx, flags).await,
        Commands::Email { action } => commands::email::handle(&action, ctx, flags).await,
        Commands::Meeting { action } => commands::meeting::handle(&action, ctx, flags).await,
        Commands::Supplier { action } => commands::supplier::handle(&action, ctx, flags).await,
        Commands::Finance { action } => commands::finance::handle(&action, ctx, flags).await,
        Commands::Document { action } => commands::document::handle(&action, ctx, flags).await,
    }
}

/// Auth and signup manage the session themselves.
const fn requires_session(command: &Commands) -> bool {
    !matches!(command, Commands::Auth { .. } | Commands::Signup { .. })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::requires_session;
    use crate::cli::Cli;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("cli should parse")
    }

    #[test]
    fn data_commands_require_a_session() {
        for args in [
            &["porter", "issue", "list"][..],
            &["porter", "building", "show"],
            &["porter", "email", "link", "EML-2024-001", "ISS-2024-001"],
            &["porter", "finance", "annual", "2024"],
        ] {
            assert!(requires_session(&parse(args).command), "{args:?}");
        }
    }

    #[test]
    fn auth_and_signup_do_not() {
        assert!(!requires_session(&parse(&["porter", "auth", "status"]).command));
        assert!(!requires_session(
            &parse(&["porter", "signup", "user", "--name", "A", "--email", "a@b.c", "--password", "x"])
                .command
        ));
    }
}
