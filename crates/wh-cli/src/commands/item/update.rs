use wh_core::filter::parse_uuid;
use wh_core::responses::{ItemResponse, ItemWithMessageResponse};
use wh_db::updates::item::{ItemUpdate, ItemUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::commands::shared::actor::{Permission, require_permission};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    name: Option<&str>,
    description: Option<&str>,
    quantity: Option<i64>,
    price: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let id = parse_uuid("id", id)?;
    let update = build_update(name, description, quantity, price);
    update.validate()?;

    let actor = require_permission(ctx, Permission::Write).await?;
    let item = ctx.service.update_item(id, &update, Some(actor.id)).await?;

    output(
        &ItemWithMessageResponse {
            item: ItemResponse::from(&item),
            message: String::from("item updated"),
        },
        flags.format,
    )
}

fn build_update(
    name: Option<&str>,
    description: Option<&str>,
    quantity: Option<i64>,
    price: Option<i64>,
) -> ItemUpdate {
    let mut builder = ItemUpdateBuilder::new();
    if let Some(name) = name {
        builder = builder.name(name);
    }
    if let Some(description) = description {
        builder = builder.description(description);
    }
    if let Some(quantity) = quantity {
        builder = builder.quantity(quantity);
    }
    if let Some(price) = price {
        builder = builder.price(price);
    }
    builder.build()
}
