use porter_auth::TokenSource;
use porter_store::DataMode;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    mode: DataMode,
    phase: String,
    email: Option<String>,
    name: Option<String>,
    role: Option<String>,
    building_id: Option<u64>,
    expires_at: Option<String>,
    token_source: Option<TokenSource>,
    session_file: String,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = ctx.session.as_ref().and_then(|session| session.user.as_ref());
    let status = AuthStatusResponse {
        authenticated: ctx.session.is_some(),
        mode: ctx.store.mode(),
        phase: ctx.bootstrap.phase().to_string(),
        email: user.map(|user| user.email.clone()),
        name: user.and_then(|user| user.name.clone()),
        role: user.and_then(|user| user.role.clone()),
        building_id: ctx.known_building_id(),
        expires_at: ctx
            .session
            .as_ref()
            .and_then(porter_auth::AuthSession::expires_at)
            .map(|exp| exp.to_rfc3339()),
        token_source: ctx.session.as_ref().and_then(|_| ctx.sessions.token_source()),
        session_file: ctx.sessions.path().display().to_string(),
    };

    output(&status, flags.format)
}
