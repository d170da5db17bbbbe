//! Log filter configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `WAREHOUSE_LOG` is unset.
    #[serde(default)]
    pub level: String,
}

impl LogConfig {
    pub fn level(&self) -> Option<&str> {
        Some(self.level.as_str()).filter(|level| !level.is_empty())
    }
}
