use std::path::PathBuf;

use clap::{Args, Subcommand};

/// History filter flags shared by `list` and `export`.
///
/// Values are kept as text and validated by `HistoryFilter::parse`.
#[derive(Clone, Debug, Default, Args)]
pub struct HistoryFilterArgs {
    /// Item ID.
    #[arg(long)]
    pub item: Option<String>,
    /// Acting user ID.
    #[arg(long)]
    pub user: Option<String>,
    /// create, update, or delete.
    #[arg(long)]
    pub action: Option<String>,
    /// Inclusive lower bound (RFC 3339).
    #[arg(long)]
    pub from: Option<String>,
    /// Inclusive upper bound (RFC 3339).
    #[arg(long)]
    pub to: Option<String>,
    /// changed_at, action, or user_id.
    #[arg(long)]
    pub sort_by: Option<String>,
    /// asc or desc.
    #[arg(long)]
    pub sort_order: Option<String>,
}

/// Item history commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HistoryCommands {
    /// List history records matching the filters.
    List {
        #[command(flatten)]
        filters: HistoryFilterArgs,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Full history of one item, with field diffs.
    Item { id: String },
    /// Export history matching the filters as CSV.
    Export {
        #[command(flatten)]
        filters: HistoryFilterArgs,
        /// Output file (defaults to stdout).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
