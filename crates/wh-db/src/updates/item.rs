//! Item update builder.

use serde::{Deserialize, Serialize};
use wh_core::errors::CoreError;

/// Partial item update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

impl ItemUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an empty update, a blank name, or
    /// a negative quantity or price.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::Validation("update has no fields".into()));
        }
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(CoreError::Validation("'name' must not be empty".into()));
        }
        if self.quantity.is_some_and(|q| q < 0) {
            return Err(CoreError::Validation("'quantity' must not be negative".into()));
        }
        if self.price.is_some_and(|p| p < 0) {
            return Err(CoreError::Validation("'price' must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ItemUpdateBuilder(ItemUpdate);

impl ItemUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ItemUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    #[must_use]
    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.0.description = Some(val.into());
        self
    }

    #[must_use]
    pub const fn quantity(mut self, val: i64) -> Self {
        self.0.quantity = Some(val);
        self
    }

    #[must_use]
    pub const fn price(mut self, val: i64) -> Self {
        self.0.price = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> ItemUpdate {
        self.0
    }
}
