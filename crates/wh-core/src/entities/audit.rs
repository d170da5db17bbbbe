use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::AuditAction;

/// A row snapshot captured by the history triggers: column name → JSON value.
pub type Snapshot = serde_json::Map<String, serde_json::Value>;

/// One immutable history entry describing a single item mutation.
///
/// `create` carries only `new_data`, `delete` only `old_data`, and `update`
/// carries both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRecord {
    pub id: Uuid,
    pub item_id: Uuid,
    pub action: AuditAction,
    /// `None` for system-initiated changes.
    pub user_id: Option<Uuid>,
    pub changed_at: DateTime<Utc>,
    pub old_data: Option<Snapshot>,
    pub new_data: Option<Snapshot>,
}
