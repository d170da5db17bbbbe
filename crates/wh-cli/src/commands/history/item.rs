use wh_core::filter::parse_uuid;
use wh_core::responses::HistoryWithDiffListResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Every record for one item, newest first, each with its field diff.
pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let item_id = parse_uuid("item_id", id)?;
    let records = ctx.service.item_history(item_id).await?;
    output(&HistoryWithDiffListResponse::new(&records), flags.format)
}
