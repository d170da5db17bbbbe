//! Database error types for wh-db.

use std::time::Duration;

use thiserror::Error;
use wh_core::errors::CoreError;
use wh_core::export::ExportError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Caller input was rejected before touching the database.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced entity does not exist.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// The request conflicts with stored state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The acting user could not be bound to the transaction.
    #[error("Attribution failed: {0}")]
    Attribution(String),

    /// A mutation exceeded its deadline and was rolled back.
    #[error("Deadline of {}ms exceeded; transaction rolled back", .0.as_millis())]
    Timeout(Duration),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// CSV rendering failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            CoreError::Other(e) => Self::Other(e),
        }
    }
}
