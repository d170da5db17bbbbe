//! Service layer orchestrating attributed mutations and history reads.
//!
//! `WhService` wraps `WhDb`. All repo methods are implemented as
//! `impl WhService` in `repos/`.

use std::future::Future;
use std::ops::Deref;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::WhDb;
use crate::attribution::{clear_acting_user, set_acting_user};
use crate::error::DatabaseError;

/// Orchestrates item mutations with trigger-written history.
///
/// Every mutation method follows this protocol:
/// 1. Take the connection lock and begin a transaction
/// 2. Bind the acting user (attribution)
/// 3. Execute SQL under the mutation deadline
/// 4. Clear the attribution and commit, or roll back on any failure
pub struct WhService {
    db: WhDb,
    mutation_timeout: Option<Duration>,
    conn_lock: Mutex<()>,
}

/// An open transaction that holds the connection lock until it ends.
pub(crate) struct MutationTx<'a> {
    tx: libsql::Transaction,
    _guard: MutexGuard<'a, ()>,
}

impl Deref for MutationTx<'_> {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl WhService {
    /// Create a new service wrapping a local database.
    ///
    /// * `db_path` is a libSQL database file, or `":memory:"` for tests.
    /// * `mutation_timeout` bounds each mutation; `None` disables the deadline.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        mutation_timeout: Option<Duration>,
    ) -> Result<Self, DatabaseError> {
        let db = WhDb::open_local(db_path).await?;
        Ok(Self::from_db(db, mutation_timeout))
    }

    /// Create from an existing `WhDb`.
    #[must_use]
    pub fn from_db(db: WhDb, mutation_timeout: Option<Duration>) -> Self {
        Self {
            db,
            mutation_timeout,
            conn_lock: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &WhDb {
        &self.db
    }

    #[must_use]
    pub const fn mutation_timeout(&self) -> Option<Duration> {
        self.mutation_timeout
    }

    /// Serialize access to the shared connection.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.conn_lock.lock().await
    }

    /// Begin a transaction stamped with `actor`.
    ///
    /// Attribution failure rolls the transaction back before returning.
    pub(crate) async fn begin_attributed(
        &self,
        operation: &'static str,
        actor: Option<Uuid>,
    ) -> Result<MutationTx<'_>, DatabaseError> {
        let guard = self.lock().await;
        let tx = self.db.conn().transaction().await?;

        if let Err(err) = set_acting_user(&tx, actor).await {
            tracing::warn!(operation, error = %err, "attribution failed; rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(operation, error = %rollback_err, "rollback failed");
            }
            return Err(err);
        }

        Ok(MutationTx { tx, _guard: guard })
    }

    /// Commit `mtx` if `result` is `Ok`, roll it back otherwise.
    pub(crate) async fn finish<T>(
        &self,
        operation: &'static str,
        mtx: MutationTx<'_>,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        let MutationTx { tx, _guard } = mtx;

        let result = match result {
            Ok(value) => clear_acting_user(&tx).await.map(|()| value),
            Err(err) => Err(err),
        };

        match result {
            Ok(value) => {
                tx.commit().await.inspect_err(|e| {
                    tracing::error!(operation, error = %e, "commit failed");
                })?;
                tracing::debug!(operation, "committed");
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(operation, error = %err, "rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(operation, error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Run `work` under the mutation deadline, if one is configured.
    ///
    /// On expiry `work` is dropped and `DatabaseError::Timeout` is returned;
    /// the caller's [`WhService::finish`] then rolls back.
    pub(crate) async fn with_deadline<T, F>(&self, work: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, DatabaseError>>,
    {
        match self.mutation_timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| DatabaseError::Timeout(limit))?,
            None => work.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{count_rows, test_service, test_service_with_timeout};

    #[tokio::test]
    async fn deadline_expiry_rolls_back_and_leaves_no_history() {
        let svc = test_service_with_timeout(Duration::from_millis(20)).await;

        let mtx = svc.begin_attributed("slow_insert", None).await.unwrap();
        let result = svc
            .with_deadline(async {
                mtx.execute(
                    "INSERT INTO items (id, name, quantity, price, created_at, updated_at)
                     VALUES ('slow', 'bolt', 1, 1, 'x', 'x')",
                    (),
                )
                .await?;
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok(())
            })
            .await;
        let result = svc.finish("slow_insert", mtx, result).await;

        assert!(matches!(result, Err(DatabaseError::Timeout(_))));
        assert_eq!(count_rows(&svc, "items").await, 0);
        assert_eq!(count_rows(&svc, "items_history").await, 0);
    }

    #[tokio::test]
    async fn no_deadline_runs_to_completion() {
        let svc = test_service().await;
        let value = svc
            .with_deadline(async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok(7)
            })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn failed_body_rolls_back() {
        let svc = test_service().await;

        let mtx = svc.begin_attributed("failing", None).await.unwrap();
        let result: Result<(), DatabaseError> = async {
            mtx.execute(
                "INSERT INTO items (id, name, quantity, price, created_at, updated_at)
                 VALUES ('gone', 'bolt', 1, 1, 'x', 'x')",
                (),
            )
            .await?;
            Err(DatabaseError::InvalidState("boom".into()))
        }
        .await;
        let result = svc.finish("failing", mtx, result).await;

        assert!(result.is_err());
        assert_eq!(count_rows(&svc, "items").await, 0);
        assert_eq!(count_rows(&svc, "items_history").await, 0);
    }

    #[tokio::test]
    async fn commit_clears_attribution() {
        let svc = test_service().await;
        let user = crate::test_support::helpers::seed_user(&svc, "alice").await;

        let mtx = svc.begin_attributed("noop", Some(user.id)).await.unwrap();
        svc.finish("noop", mtx, Ok(())).await.unwrap();

        assert_eq!(count_rows(&svc, "audit_context").await, 0);
    }
}
