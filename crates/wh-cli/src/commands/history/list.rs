use wh_core::responses::HistoryListResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HistoryFilterArgs;
use crate::commands::shared::filter::history_filter;
use crate::commands::shared::limit::page_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    filters: &HistoryFilterArgs,
    offset: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = page_limit(flags.limit, ctx.config.general.default_limit);
    let filter = history_filter(filters, limit, offset)?;

    let (records, total) = ctx.service.record_history(&filter).await?;
    output(&HistoryListResponse::new(&records, total), flags.format)
}
