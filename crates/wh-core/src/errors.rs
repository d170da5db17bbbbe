//! Cross-cutting error types for the warehouse tracker.
//!
//! Storage errors (`DatabaseError`) live in `wh-db`; the binary converges
//! everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any warehouse crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller input failed validation. Raised before any database access.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
