mod export;
mod item;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HistoryCommands;
use crate::context::AppContext;

/// Handle `whc history`.
pub async fn handle(
    action: &HistoryCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        HistoryCommands::List { filters, offset } => list::run(filters, *offset, ctx, flags).await,
        HistoryCommands::Item { id } => item::run(id, ctx, flags).await,
        HistoryCommands::Export { filters, out } => {
            export::run(filters, out.as_deref(), ctx, flags).await
        }
    }
}
