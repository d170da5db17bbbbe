//! Local database configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ConfigError;

fn default_path() -> String {
    ".warehouse/warehouse.db".to_string()
}

/// Default per-mutation deadline in milliseconds.
const fn default_mutation_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the local libSQL database file.
    #[serde(default = "default_path")]
    pub path: String,

    /// Deadline for a single attributed mutation. `0` disables it.
    #[serde(default = "default_mutation_timeout_ms")]
    pub mutation_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            mutation_timeout_ms: default_mutation_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    /// The mutation deadline, or `None` when disabled.
    pub const fn mutation_timeout(&self) -> Option<Duration> {
        if self.mutation_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.mutation_timeout_ms))
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
