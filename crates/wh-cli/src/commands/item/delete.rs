use serde::Serialize;
use wh_core::filter::parse_uuid;

use crate::cli::GlobalFlags;
use crate::commands::shared::actor::{Permission, require_permission};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeletedResponse {
    id: String,
    message: &'static str,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = parse_uuid("id", id)?;
    let actor = require_permission(ctx, Permission::Delete).await?;
    ctx.service.delete_item(id, Some(actor.id)).await?;

    output(
        &DeletedResponse {
            id: id.to_string(),
            message: "item deleted",
        },
        flags.format,
    )
}
