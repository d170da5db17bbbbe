use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Get or create a user with the given role.
    Login {
        /// Letters only.
        #[arg(long)]
        name: String,
        /// admin, manager, or viewer.
        #[arg(long)]
        role: String,
    },
    /// Show the user mutations are attributed to.
    Whoami,
}
