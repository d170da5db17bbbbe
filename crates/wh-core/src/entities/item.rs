use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// A stocked item. Prices are stored in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: i64,
    pub price: i64,
}

impl NewItem {
    /// Check required fields and lower bounds.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("'name' is required".into()));
        }
        if self.quantity < 1 {
            return Err(CoreError::Validation("'quantity' must be at least 1".into()));
        }
        if self.price < 1 {
            return Err(CoreError::Validation("'price' must be at least 1".into()));
        }
        Ok(())
    }
}
