use porter_api::{NewBuilding, SignupUser};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SignupCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `porter signup`.
pub async fn handle(
    action: &SignupCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if ctx.is_example() {
        anyhow::bail!("signup: not available in example mode");
    }

    match action {
        SignupCommands::User {
            name,
            email,
            password,
        } => {
            let signup = SignupUser {
                name: name.clone(),
                email: email.trim().to_string(),
                password: password.clone(),
            };
            let user = ctx
                .client
                .signup_user(&signup)
                .await
                .map_err(|error| anyhow::anyhow!("signup user: {}", error.user_message()))?;
            output(&user, flags.format)
        }
        SignupCommands::Building {
            name,
            address,
            postcode,
            units,
        } => {
            ctx.require_session()?;
            let building = NewBuilding {
                name: name.clone(),
                address: address.clone(),
                postcode: postcode.clone(),
                units: *units,
            };
            let created = ctx
                .client
                .create_building(&building)
                .await
                .map_err(|error| ctx.api_error(&error))?;
            output(&created, flags.format)
        }
        SignupCommands::Invite { email, role } => {
            ctx.require_session()?;
            let building_id = ctx.building_id().await?;
            let invitation = ctx
                .client
                .invite(building_id, email.trim(), role.as_deref())
                .await
                .map_err(|error| ctx.api_error(&error))?;
            output(&invitation, flags.format)
        }
    }
}
