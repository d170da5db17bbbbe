//! Item history repository: filtered queries, per-item history, CSV export.
//!
//! Rows are written only by the `items` triggers. This module reads them.

use uuid::Uuid;

use wh_core::entities::AuditRecord;
use wh_core::export::to_csv;
use wh_core::filter::HistoryFilter;
use wh_core::responses::HistoryExportRow;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_snapshot, parse_uuid};
use crate::history_query::build;
use crate::service::WhService;

const HISTORY_COLS: &str = "id, item_id, action, user_id, changed_at, old_data, new_data";

fn row_to_record(row: &libsql::Row) -> Result<AuditRecord, DatabaseError> {
    Ok(AuditRecord {
        id: parse_uuid(&row.get::<String>(0)?)?,
        item_id: parse_uuid(&row.get::<String>(1)?)?,
        action: parse_enum(&row.get::<String>(2)?)?,
        user_id: get_opt_string(row, 3)?
            .as_deref()
            .map(parse_uuid)
            .transpose()?,
        changed_at: parse_datetime(&row.get::<String>(4)?)?,
        old_data: parse_snapshot(get_opt_string(row, 5)?.as_deref())?,
        new_data: parse_snapshot(get_opt_string(row, 6)?.as_deref())?,
    })
}

async fn count_and_fetch(
    conn: &libsql::Connection,
    filter: &HistoryFilter,
) -> Result<(Vec<AuditRecord>, u64), DatabaseError> {
    let parts = build(filter);

    let mut rows = conn
        .query(
            &format!("SELECT COUNT(*) FROM items_history {}", parts.where_clause),
            libsql::params_from_iter(parts.params.clone()),
        )
        .await?;
    let count = rows
        .next()
        .await?
        .ok_or(DatabaseError::NoResult)?
        .get::<i64>(0)?;
    let total = u64::try_from(count)
        .map_err(|_| DatabaseError::InvalidState(format!("negative history count {count}")))?;

    let (page_clause, params) = parts.paginated(filter.limit, filter.offset);
    let mut rows = conn
        .query(
            &format!(
                "SELECT {HISTORY_COLS} FROM items_history {} {} {page_clause}",
                parts.where_clause, parts.order_clause
            ),
            libsql::params_from_iter(params),
        )
        .await?;

    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(row_to_record(&row)?);
    }
    Ok((records, total))
}

impl WhService {
    /// History records matching `filter`, plus the total matching count
    /// before pagination.
    ///
    /// Count and page are read in one transaction so they agree. An empty
    /// result is success.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an inverted time range, or
    /// `DatabaseError` if a query fails.
    pub async fn record_history(
        &self,
        filter: &HistoryFilter,
    ) -> Result<(Vec<AuditRecord>, u64), DatabaseError> {
        filter.validate()?;

        let _guard = self.lock().await;
        let tx = self.db().conn().transaction().await?;
        match count_and_fetch(&tx, filter).await {
            Ok(found) => {
                tx.commit().await?;
                tracing::debug!(records = found.0.len(), total = found.1, "history queried");
                Ok(found)
            }
            Err(err) => {
                tracing::error!(operation = "record_history", error = %err, "history query failed");
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(operation = "record_history", error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Every history record for one item, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn record_history_by_item(
        &self,
        item_id: Uuid,
    ) -> Result<Vec<AuditRecord>, DatabaseError> {
        let (records, _) = self.record_history(&HistoryFilter::for_item(item_id)).await?;
        Ok(records)
    }

    /// History for one item, distinguishing an unknown item from an item
    /// with no history.
    ///
    /// Deleted items keep their history and are not `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the item has neither a live row
    /// nor any history.
    pub async fn item_history(&self, item_id: Uuid) -> Result<Vec<AuditRecord>, DatabaseError> {
        let records = self.record_history_by_item(item_id).await?;
        if records.is_empty() && !self.item_exists(item_id).await? {
            return Err(DatabaseError::not_found("item", item_id));
        }
        Ok(records)
    }

    /// Export history matching `filter` as a CSV document.
    ///
    /// The header is always present; an empty match is header-only.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or `DatabaseError::Export`
    /// if rendering fails.
    pub async fn export_history_csv(&self, filter: &HistoryFilter) -> Result<Vec<u8>, DatabaseError> {
        let (records, _) = self.record_history(filter).await?;
        let rows: Vec<HistoryExportRow> = records.iter().map(HistoryExportRow::from).collect();
        let bytes = to_csv(&rows).inspect_err(|e| {
            tracing::error!(operation = "export_history_csv", error = %e, "CSV export failed");
        })?;
        tracing::debug!(rows = rows.len(), bytes = bytes.len(), "history exported");
        Ok(bytes)
    }
}
