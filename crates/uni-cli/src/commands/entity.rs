//! `unidash <entity> ...`: one handler for all seven entities.

use anyhow::bail;
use serde_json::{Value, json};
use uni_api::Transport;
use uni_api::page::EntityPage;
use uni_auth::Access;
use uni_core::form::partial_payload;
use uni_core::resource::Resource;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::{assign::parse_assignments, prompt};
use crate::context::AppContext;
use crate::output::output;

pub async fn handle<R: Resource, T: Transport>(
    action: &EntityCommands,
    ctx: &AppContext<T>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require(Access::Authenticated).await?;
    let yes = matches!(action, EntityCommands::Delete { yes: true, .. });
    let value = execute::<R, T>(action, ctx, |record: &R| {
        yes || prompt::confirm(&format!("Delete {} {}?", R::LABEL, record.id()))
    })
    .await?;
    output(&value, flags.format)
}

fn page<R: Resource, T: Transport>(ctx: &AppContext<T>) -> EntityPage<R, T> {
    EntityPage::new(ctx.client.clone()).with_bus(&ctx.bus)
}

/// Run one entity command and return what to print.
pub async fn execute<R: Resource, T: Transport>(
    action: &EntityCommands,
    ctx: &AppContext<T>,
    confirm: impl FnOnce(&R) -> bool,
) -> anyhow::Result<Value> {
    match action {
        EntityCommands::List => {
            let mut page = page::<R, T>(ctx);
            page.load().await?;
            Ok(serde_json::to_value(page.rows().unwrap_or_default())?)
        }
        EntityCommands::Get { id } => Ok(serde_json::to_value(ctx.client.get::<R>(*id).await?)?),
        EntityCommands::Create { set } => {
            let pairs = parse_assignments(set)?;
            let mut page = page::<R, T>(ctx);
            page.open_create();
            for (field, value) in pairs {
                page.set_field(&field, value)?;
            }
            Ok(serde_json::to_value(page.submit().await?)?)
        }
        EntityCommands::Update { id, set } => {
            let pairs = parse_assignments(set)?;
            let mut page = page::<R, T>(ctx);
            page.load().await?;
            page.open_edit(*id)?;
            for (field, value) in pairs {
                page.set_field(&field, value)?;
            }
            Ok(serde_json::to_value(page.submit().await?)?)
        }
        EntityCommands::Patch { id, set } => {
            let payload = partial_payload::<R>(&parse_assignments(set)?)?;
            Ok(serde_json::to_value(ctx.client.patch::<R>(*id, payload).await?)?)
        }
        EntityCommands::Delete { id, .. } => {
            let mut page = page::<R, T>(ctx);
            page.load().await?;
            let deleted = page.delete(*id, confirm).await?;
            Ok(json!({ "id": id, "deleted": deleted }))
        }
        EntityCommands::Options => {
            let Some(parent) = R::PARENT else {
                bail!("{} records have no parent to choose", R::LABEL);
            };
            let mut page = page::<R, T>(ctx);
            page.load().await?;
            tracing::debug!(parent = parent.path, "listing foreign key options");
            Ok(serde_json::to_value(page.foreign_key_options())?)
        }
    }
}
