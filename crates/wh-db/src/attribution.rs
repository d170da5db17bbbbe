//! Binds the acting user to the current transaction.
//!
//! `SQLite` has no transaction-local session variable, so the user id is
//! written to the single-row `audit_context` table. The history triggers read
//! it while computing each row. It is cleared before commit and discarded by
//! rollback, so it never outlives the transaction.

use uuid::Uuid;

use crate::error::DatabaseError;

/// Stamp `conn`'s open transaction with `actor`. `None` is a no-op.
///
/// # Errors
///
/// Returns `DatabaseError::Attribution` if the user cannot be bound, for
/// example because no such user exists. The caller must roll back.
pub async fn set_acting_user(
    conn: &libsql::Connection,
    actor: Option<Uuid>,
) -> Result<(), DatabaseError> {
    let Some(user_id) = actor else {
        return Ok(());
    };

    conn.execute(
        "INSERT INTO audit_context (id, user_id) VALUES (1, ?1)
         ON CONFLICT(id) DO UPDATE SET user_id = excluded.user_id",
        [user_id.to_string()],
    )
    .await
    .map_err(|e| DatabaseError::Attribution(format!("cannot attribute to user {user_id}: {e}")))?;
    Ok(())
}

/// Remove any acting user from `conn`'s open transaction.
///
/// # Errors
///
/// Returns `DatabaseError::Attribution` if the slot cannot be cleared.
pub async fn clear_acting_user(conn: &libsql::Connection) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM audit_context", ())
        .await
        .map_err(|e| DatabaseError::Attribution(format!("cannot clear attribution: {e}")))?;
    Ok(())
}

/// The user currently bound to `conn`, if any.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn acting_user(conn: &libsql::Connection) -> Result<Option<String>, DatabaseError> {
    let mut rows = conn
        .query("SELECT user_id FROM audit_context WHERE id = 1", ())
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row.get::<String>(0)?)),
        None => Ok(None),
    }
}
