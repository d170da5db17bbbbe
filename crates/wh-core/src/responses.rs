//! Outward-facing projections of items and history records.
//!
//! These are what the CLI prints. Ids become strings, timestamps become
//! RFC 3339 at whole-second precision in UTC, and prices are rendered from
//! minor units.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::{FieldDiff, diff};
use crate::entities::{AuditRecord, Item, Snapshot};
use crate::enums::AuditAction;

const MINOR_UNITS: u64 = 100;

/// Render a minor-unit amount as `units.cents` (`1999` → `"19.99"`).
#[must_use]
pub fn format_price(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}{}.{:02}", abs / MINOR_UNITS, abs % MINOR_UNITS)
}

/// RFC 3339, UTC, whole seconds, `Z` suffix.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub price: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            price: format_price(item.price),
            created_at: format_timestamp(&item.created_at),
            updated_at: format_timestamp(&item.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
    pub total: u64,
}

impl ItemListResponse {
    #[must_use]
    pub fn from_items(items: &[Item]) -> Self {
        Self {
            items: items.iter().map(ItemResponse::from).collect(),
            total: items.len() as u64,
        }
    }
}

/// An item plus a human-readable status line, returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemWithMessageResponse {
    #[serde(flatten)]
    pub item: ItemResponse,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub id: String,
    pub item_id: String,
    pub action: AuditAction,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_id: Option<String>,
    pub changed_at: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub old_data: Option<Snapshot>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub new_data: Option<Snapshot>,
}

impl From<&AuditRecord> for HistoryResponse {
    fn from(record: &AuditRecord) -> Self {
        Self {
            id: record.id.to_string(),
            item_id: record.item_id.to_string(),
            action: record.action,
            user_id: record.user_id.map(|id| id.to_string()),
            changed_at: format_timestamp(&record.changed_at),
            old_data: record.old_data.clone(),
            new_data: record.new_data.clone(),
        }
    }
}

/// A history record with its field-level diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryWithDiffResponse {
    #[serde(flatten)]
    pub record: HistoryResponse,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub diff: Vec<FieldDiff>,
}

impl From<&AuditRecord> for HistoryWithDiffResponse {
    fn from(record: &AuditRecord) -> Self {
        Self {
            record: HistoryResponse::from(record),
            diff: diff(record.old_data.as_ref(), record.new_data.as_ref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryListResponse {
    pub history: Vec<HistoryResponse>,
    pub total: u64,
}

impl HistoryListResponse {
    #[must_use]
    pub fn new(records: &[AuditRecord], total: u64) -> Self {
        Self {
            history: records.iter().map(HistoryResponse::from).collect(),
            total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryWithDiffListResponse {
    pub history: Vec<HistoryWithDiffResponse>,
    pub total: u64,
}

impl HistoryWithDiffListResponse {
    #[must_use]
    pub fn new(records: &[AuditRecord]) -> Self {
        Self {
            history: records.iter().map(HistoryWithDiffResponse::from).collect(),
            total: records.len() as u64,
        }
    }
}

/// Flat, export-shaped history row. Every column is text; absent user ids
/// and snapshots are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryExportRow {
    pub id: String,
    pub item_id: String,
    pub action: String,
    pub user_id: String,
    pub changed_at: String,
    pub old_data: String,
    pub new_data: String,
}

impl From<&AuditRecord> for HistoryExportRow {
    fn from(record: &AuditRecord) -> Self {
        Self {
            id: record.id.to_string(),
            item_id: record.item_id.to_string(),
            action: record.action.as_str().to_string(),
            user_id: record.user_id.map(|id| id.to_string()).unwrap_or_default(),
            changed_at: format_timestamp(&record.changed_at),
            old_data: snapshot_text(record.old_data.as_ref()),
            new_data: snapshot_text(record.new_data.as_ref()),
        }
    }
}

fn snapshot_text(snapshot: Option<&Snapshot>) -> String {
    snapshot
        .and_then(|map| serde_json::to_string(map).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    fn record(action: AuditAction, old: Option<Snapshot>, new: Option<Snapshot>) -> AuditRecord {
        AuditRecord {
            id: Uuid::new_v4(),
            item_id: Uuid::new_v4(),
            action,
            user_id: None,
            changed_at: Utc.with_ymd_and_hms(2026, 4, 2, 9, 15, 0).unwrap()
                + chrono::Duration::milliseconds(250),
            old_data: old,
            new_data: new,
        }
    }

    fn snap(value: serde_json::Value) -> Snapshot {
        value.as_object().cloned().unwrap()
    }

    #[rstest]
    #[case(0, "0.00")]
    #[case(5, "0.05")]
    #[case(1999, "19.99")]
    #[case(100_000, "1000.00")]
    #[case(-50, "-0.50")]
    #[case(-1250, "-12.50")]
    fn formats_price(#[case] amount: i64, #[case] expected: &str) {
        assert_eq!(format_price(amount), expected);
    }

    #[test]
    fn history_response_truncates_to_seconds() {
        let rec = record(AuditAction::Create, None, Some(snap(json!({"name": "a"}))));
        let resp = HistoryResponse::from(&rec);
        assert_eq!(resp.changed_at, "2026-04-02T09:15:00Z");
        assert_eq!(resp.user_id, None);
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let rec = record(AuditAction::Delete, Some(snap(json!({"name": "a"}))), None);
        let value = serde_json::to_value(HistoryResponse::from(&rec)).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("old_data"));
        assert!(!obj.contains_key("new_data"));
        assert!(!obj.contains_key("user_id"));
    }

    #[test]
    fn with_diff_flattens_record() {
        let rec = record(
            AuditAction::Update,
            Some(snap(json!({"quantity": 1, "name": "a"}))),
            Some(snap(json!({"quantity": 2, "name": "a"}))),
        );
        let value = serde_json::to_value(HistoryWithDiffResponse::from(&rec)).unwrap();
        assert_eq!(value["action"], json!("update"));
        assert_eq!(
            value["diff"],
            json!([{"field": "quantity", "old_value": 1, "new_value": 2}])
        );
    }

    #[test]
    fn export_row_uses_empty_text_for_absent_values() {
        let rec = record(AuditAction::Create, None, Some(snap(json!({"quantity": 3}))));
        let row = HistoryExportRow::from(&rec);
        assert_eq!(row.user_id, "");
        assert_eq!(row.old_data, "");
        assert_eq!(row.new_data, r#"{"quantity":3}"#);
        assert_eq!(row.action, "create");
    }
}
