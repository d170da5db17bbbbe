use clap::Subcommand;

use crate::cli::subcommands::{HistoryCommands, ItemCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Users and roles.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Inventory items.
    Item {
        #[command(subcommand)]
        action: ItemCommands,
    },
    /// Item history.
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
}
