//! Errors raised while loading warehouse configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `WAREHOUSE_*` variable could not be read into [`crate::WhConfig`].
    #[error("Failed to load warehouse configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A loaded value is present but unusable, e.g. an empty `database.path`.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
