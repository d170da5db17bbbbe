//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default page size for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// User name that mutations are attributed to when `--as` is not given.
    #[serde(default)]
    pub default_actor: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_actor: String::new(),
        }
    }
}

impl GeneralConfig {
    pub fn default_actor(&self) -> Option<&str> {
        Some(self.default_actor.as_str()).filter(|name| !name.is_empty())
    }
}
