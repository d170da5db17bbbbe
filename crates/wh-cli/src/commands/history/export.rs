use std::path::Path;

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HistoryFilterArgs;
use crate::commands::shared::filter::history_filter;
use crate::context::AppContext;
use crate::output::output_bytes;

/// Default file name when writing an export next to the working directory.
pub const EXPORT_FILE_NAME: &str = "history.csv";

/// Write matching history as CSV to `out`, or stdout.
///
/// Exports are unbounded unless `--limit` is given. `--format` does not
/// apply.
pub async fn run(
    filters: &HistoryFilterArgs,
    out: Option<&Path>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = flags.limit.filter(|limit| *limit > 0);
    let filter = history_filter(filters, limit, None)?;
    let bytes = ctx.service.export_history_csv(&filter).await?;

    match out {
        Some(path) => {
            let path = resolve_out(path);
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("failed to write export to '{}'", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "history exported");
            if !flags.quiet {
                eprintln!("wrote {}", path.display());
            }
            Ok(())
        }
        None => output_bytes(&bytes),
    }
}

/// A directory target gets the default export file name.
fn resolve_out(path: &Path) -> std::path::PathBuf {
    if path.is_dir() {
        path.join(EXPORT_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}
