//! # wh-db
//!
//! libSQL storage for the warehouse tracker.
//!
//! Holds items, users, and the item history written by database triggers.
//! Every mutating item operation runs in a transaction that first binds the
//! acting user ([`attribution`]), so the triggers can stamp each history row.
//! History is read back through [`history_query`], a fixed-grammar builder
//! with a sort allowlist, and exported with `wh_core::export`.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod attribution;
pub mod error;
pub mod helpers;
pub mod history_query;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and its single connection.
pub struct WhDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl WhDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let wh_db = Self { db, conn };
        wh_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(wh_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> WhDb {
        WhDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        for table in ["users", "items", "items_history", "audit_context"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn history_triggers_exist() {
        let db = test_db().await;

        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='trigger' ORDER BY name",
                (),
            )
            .await
            .unwrap();
        let mut names = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            names.push(row.get::<String>(0).unwrap());
        }
        assert_eq!(
            names,
            vec![
                "items_history_on_delete",
                "items_history_on_insert",
                "items_history_on_update"
            ]
        );
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.db");
        let path = path.to_str().unwrap();

        let db = WhDb::open_local(path).await.unwrap();
        db.conn()
            .execute(
                "INSERT INTO users (id, name, role, created_at, updated_at)
                 VALUES ('u1', 'ada', 'admin', 'x', 'x')",
                (),
            )
            .await
            .unwrap();
        drop(db);

        let reopened = WhDb::open_local(path).await.unwrap();
        let mut rows = reopened
            .conn()
            .query("SELECT COUNT(*) FROM users", ())
            .await
            .unwrap();
        let count = rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn foreign_keys_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO audit_context (id, user_id) VALUES (1, 'nobody')",
                (),
            )
            .await;
        assert!(result.is_err(), "unknown user must violate the foreign key");
    }

    #[tokio::test]
    async fn trigger_ids_are_uuid_v4_shaped() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO items (id, name, quantity, price, created_at, updated_at)
                 VALUES ('i1', 'bolt', 1, 1, 'x', 'x')",
                (),
            )
            .await
            .unwrap();

        let mut rows = db
            .conn()
            .query("SELECT id, changed_at FROM items_history", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        let id = uuid::Uuid::parse_str(&row.get::<String>(0).unwrap()).unwrap();
        assert_eq!(id.get_version_num(), 4);
        assert!(helpers::parse_datetime(&row.get::<String>(1).unwrap()).is_ok());
    }
}
