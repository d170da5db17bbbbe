mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ItemCommands;
use crate::context::AppContext;

/// Handle `whc item`.
pub async fn handle(
    action: &ItemCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ItemCommands::Create {
            name,
            description,
            quantity,
            price,
        } => create::run(name, description, *quantity, *price, ctx, flags).await,
        ItemCommands::Get { id } => get::run(id, ctx, flags).await,
        ItemCommands::List => list::run(ctx, flags).await,
        ItemCommands::Update {
            id,
            name,
            description,
            quantity,
            price,
        } => {
            update::run(
                id,
                name.as_deref(),
                description.as_deref(),
                *quantity,
                *price,
                ctx,
                flags,
            )
            .await
        }
        ItemCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}
