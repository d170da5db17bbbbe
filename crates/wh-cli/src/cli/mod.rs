use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `whc` binary.
#[derive(Debug, Parser)]
#[command(name = "whc", version, about = "Warehouse inventory tracker with item history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw, csv
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (defaults to `database.path` from config)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Name of the user mutations are attributed to
    #[arg(long = "as", global = true, value_name = "USER")]
    pub acting_as: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            db: self.db.clone(),
            acting_as: self.acting_as.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{HistoryCommands, ItemCommands, UserCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "whc", "--format", "table", "--limit", "10", "--verbose", "item", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Item {
                action: ItemCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["whc", "item", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["whc", "--format", "xml", "item", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_accepts_all_supported_values() {
        for value in ["json", "table", "raw", "csv"] {
            let cli = Cli::try_parse_from(["whc", "--format", value, "item", "list"])
                .expect("cli should parse");
            assert!(matches!(cli.command, Commands::Item { .. }));
        }
    }

    #[test]
    fn acting_user_and_db_are_copied_to_flags() {
        let cli = Cli::try_parse_from([
            "whc", "--db", "/tmp/wh.db", "item", "delete", "abc", "--as", "ada",
        ])
        .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/wh.db"));
        assert_eq!(flags.acting_as.as_deref(), Some("ada"));
    }

    #[test]
    fn user_login_requires_name_and_role() {
        let cli = Cli::try_parse_from(["whc", "user", "login", "--name", "ada", "--role", "admin"])
            .expect("cli should parse");
        match cli.command {
            Commands::User {
                action: UserCommands::Login { name, role },
            } => {
                assert_eq!(name, "ada");
                assert_eq!(role, "admin");
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["whc", "user", "login", "--name", "ada"]).is_err());
    }

    #[test]
    fn item_update_fields_are_optional() {
        let cli = Cli::try_parse_from(["whc", "item", "update", "abc", "--quantity", "0"])
            .expect("cli should parse");
        match cli.command {
            Commands::Item {
                action:
                    ItemCommands::Update {
                        id,
                        name,
                        quantity,
                        price,
                        ..
                    },
            } => {
                assert_eq!(id, "abc");
                assert_eq!(name, None);
                assert_eq!(quantity, Some(0));
                assert_eq!(price, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn history_list_collects_filters_as_raw_text() {
        let cli = Cli::try_parse_from([
            "whc",
            "history",
            "list",
            "--action",
            "update",
            "--from",
            "2026-01-01T00:00:00Z",
            "--sort-by",
            "action",
            "--sort-order",
            "asc",
            "--offset",
            "5",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::History {
                action: HistoryCommands::List { filters, offset },
            } => {
                assert_eq!(filters.action.as_deref(), Some("update"));
                assert_eq!(filters.from.as_deref(), Some("2026-01-01T00:00:00Z"));
                assert_eq!(filters.to, None);
                assert_eq!(filters.sort_by.as_deref(), Some("action"));
                assert_eq!(filters.sort_order.as_deref(), Some("asc"));
                assert_eq!(offset, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn history_export_accepts_output_path() {
        let cli = Cli::try_parse_from([
            "whc", "history", "export", "--item", "abc", "--out", "history.csv",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::History {
                action: HistoryCommands::Export { filters, out },
            } => {
                assert_eq!(filters.item.as_deref(), Some("abc"));
                assert_eq!(out.as_deref(), Some(std::path::Path::new("history.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
