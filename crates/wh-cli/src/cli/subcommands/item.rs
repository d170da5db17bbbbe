use clap::Subcommand;

/// Item commands. Prices are given in minor currency units.
#[derive(Clone, Debug, Subcommand)]
pub enum ItemCommands {
    /// Create an item.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        quantity: i64,
        #[arg(long)]
        price: i64,
    },
    /// Get an item by ID.
    Get { id: String },
    /// List items, newest first.
    List,
    /// Update an item. Omitted fields keep their value.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        quantity: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        price: Option<i64>,
    },
    /// Delete an item. Its history is kept.
    Delete { id: String },
}
