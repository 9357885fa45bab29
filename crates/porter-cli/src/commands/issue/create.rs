use porter_core::updates::IssueDraft;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_priority;
use crate::context::AppContext;
use crate::output::output;

pub struct CreateArgs<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub email: Option<&'a str>,
}

pub async fn run(args: CreateArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let building_id = ctx.building_id().await?;
    let draft = IssueDraft {
        building_id: Some(building_id),
        title: args.title.to_string(),
        summary: args.summary.to_string(),
        category: args.category.to_string(),
        priority: parse_priority(args.priority)?,
        status: None,
        email_id: args.email.map(String::from),
    };

    let created = ctx
        .store
        .issues
        .create(draft)
        .await
        .map_err(|failure| ctx.op_error(failure))?;
    let mut issue = created.entity;

    if let Some(email_id) = args.email {
        if let Err(failure) = ctx.store.emails.load().await {
            tracing::warn!(error = %failure, "could not load emails to link the new issue");
        }
        match ctx.store.link_email_to_issue(email_id, &issue.id) {
            Ok((_, linked)) => issue = linked,
            Err(failure) => {
                tracing::warn!(email_id, error = %failure, "issue created without email link");
            }
        }
    }

    output(&issue, flags.format)
}
