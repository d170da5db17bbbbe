//! Embedded schema migrations, applied in order on every open.
//!
//! Each script is idempotent (`IF NOT EXISTS` throughout), so reopening an
//! existing warehouse database is a no-op.

use crate::WhDb;
use crate::error::DatabaseError;

/// `(name, script)` pairs in application order.
///
/// `001_initial`: users, items, `items_history`, `audit_context`, and the
/// three history triggers on `items`.
const MIGRATIONS: [(&str, &str); 1] = [(
    "001_initial",
    include_str!("../migrations/001_initial.sql"),
)];

impl WhDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for (name, script) in MIGRATIONS {
            self.conn
                .execute_batch(script)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            tracing::trace!(migration = name, "migration applied");
        }
        Ok(())
    }
}
