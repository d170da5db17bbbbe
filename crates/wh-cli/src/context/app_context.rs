use std::path::Path;

use anyhow::Context;
use wh_config::WhConfig;
use wh_db::service::WhService;

use crate::cli::GlobalFlags;

const IN_MEMORY: &str = ":memory:";

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: WhService,
    pub config: WhConfig,
    /// User name mutations are attributed to, from `--as` or
    /// `general.default_actor`.
    pub acting_as: Option<String>,
}

impl AppContext {
    /// Open the database named by `--db` or `database.path`.
    pub async fn init(config: WhConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = flags
            .db
            .clone()
            .unwrap_or_else(|| config.database.path.clone());

        if db_path != IN_MEMORY {
            ensure_parent_dir(Path::new(&db_path))?;
        }

        let service = WhService::new_local(&db_path, config.database.mutation_timeout())
            .await
            .with_context(|| format!("failed to open warehouse database at '{db_path}'"))?;
        tracing::debug!(path = %db_path, "warehouse database ready");

        let acting_as = resolve_acting_as(flags.acting_as.as_deref(), &config);

        Ok(Self {
            service,
            config,
            acting_as,
        })
    }
}

/// `--as` wins over the configured default actor.
fn resolve_acting_as(flag: Option<&str>, config: &WhConfig) -> Option<String> {
    flag.map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| config.general.default_actor())
        .map(str::to_string)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display())),
        _ => Ok(()),
    }
}
