use wh_core::entities::NewItem;
use wh_core::responses::{ItemResponse, ItemWithMessageResponse};

use crate::cli::GlobalFlags;
use crate::commands::shared::actor::{Permission, require_permission};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    description: &str,
    quantity: i64,
    price: i64,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let input = NewItem {
        name: name.to_string(),
        description: description.to_string(),
        quantity,
        price,
    };
    input.validate()?;

    let actor = require_permission(ctx, Permission::Write).await?;
    let item = ctx.service.create_item(&input, Some(actor.id)).await?;

    output(
        &ItemWithMessageResponse {
            item: ItemResponse::from(&item),
            message: String::from("item created"),
        },
        flags.format,
    )
}
