use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::Role;
use crate::errors::CoreError;

/// A warehouse user. Mutations are attributed to a user's `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// User names are non-empty and letters only.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the name is empty or contains
    /// anything other than alphabetic characters.
    pub fn validate_name(name: &str) -> Result<(), CoreError> {
        if name.is_empty() || !name.chars().all(char::is_alphabetic) {
            return Err(CoreError::Validation(format!(
                "invalid user name '{name}': letters only"
            )));
        }
        Ok(())
    }
}
