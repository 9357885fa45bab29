use porter_core::updates::SupplierDraft;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SupplierCommands;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::commands::shared::{load_cached, store_error};
use crate::context::AppContext;
use crate::output::{output, output_rows};

/// Handle `porter supplier`.
pub async fn handle(
    action: &SupplierCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SupplierCommands::List { limit } => {
            let mut suppliers = load_cached(&ctx.store.suppliers, ctx).await?;
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            truncate(&mut suppliers, limit);
            output_rows(&suppliers, flags.format)
        }
        SupplierCommands::Create {
            name,
            service,
            contact,
            email,
            phone,
        } => {
            if name.trim().is_empty() {
                anyhow::bail!("supplier create: --name must not be empty");
            }
            let draft = SupplierDraft {
                building_id: ctx.known_building_id(),
                name: name.trim().to_string(),
                service: service.clone(),
                contact_name: contact.clone(),
                email: email.clone(),
                phone: phone.clone(),
            };
            let created = ctx
                .backends
                .suppliers
                .create(draft)
                .await
                .map_err(|error| store_error(&error, ctx))?;
            ctx.store.suppliers.reset();
            output(&created.entity, flags.format)
        }
    }
}
