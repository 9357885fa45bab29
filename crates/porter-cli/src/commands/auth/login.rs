use anyhow::Context;
use porter_auth::AuthSession;
use porter_core::entities::AuthUser;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user: Option<AuthUser>,
    building_id: Option<u64>,
    expires_at: Option<String>,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if ctx.is_example() {
        anyhow::bail!("auth login: example mode serves local data and needs no sign-in");
    }
    if args.email.trim().is_empty() || args.password.is_empty() {
        anyhow::bail!("auth login: email and password are required");
    }

    if !ctx.bootstrap.begin_login() {
        tracing::debug!(phase = %ctx.bootstrap.phase(), "replacing existing session");
    }

    let response = match ctx.client.login(args.email.trim(), &args.password).await {
        Ok(response) => response,
        Err(error) => {
            ctx.bootstrap.login_failed();
            anyhow::bail!("auth login: {}", error.user_message());
        }
    };

    let session = AuthSession::new(response.token, response.user);
    ctx.sessions
        .store(&session)
        .context("failed to persist session")?;
    ctx.bootstrap.login_succeeded();
    tracing::info!(email = %args.email.trim(), "signed in");

    output(
        &AuthLoginResponse {
            authenticated: true,
            building_id: session.building_id(),
            expires_at: session.expires_at().map(|exp| exp.to_rfc3339()),
            user: session.user,
        },
        flags.format,
    )
}
