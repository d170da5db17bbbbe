use wh_core::filter::parse_uuid;
use wh_core::responses::ItemResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = parse_uuid("id", id)?;
    let item = ctx.service.get_item(id).await?;
    output(&ItemResponse::from(&item), flags.format)
}
