use wh_core::entities::Item;
use wh_core::responses::ItemListResponse;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::page_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let items = ctx.service.list_items().await?;
    let limit = page_limit(flags.limit, ctx.config.general.default_limit);
    output(&page(&items, limit)?, flags.format)
}

/// First `limit` items; `total` still counts every item.
fn page(items: &[Item], limit: Option<u32>) -> anyhow::Result<ItemListResponse> {
    let shown = match limit {
        Some(limit) => items.len().min(usize::try_from(limit)?),
        None => items.len(),
    };
    let mut response = ItemListResponse::from_items(&items[..shown]);
    response.total = items.len() as u64;
    Ok(response)
}
