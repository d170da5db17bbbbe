//! History filter: raw caller input and its validated, typed form.
//!
//! Parsing happens here, before any database call. Malformed ids, unknown
//! actions, unparsable timestamps and inverted ranges are all
//! `CoreError::Validation`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::AuditAction;
use crate::errors::CoreError;

/// Unvalidated filter fields as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub item_id: Option<String>,
    pub user_id: Option<String>,
    pub action: Option<String>,
    /// RFC 3339, inclusive lower bound.
    pub from: Option<String>,
    /// RFC 3339, inclusive upper bound.
    pub to: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Validated history filter.
///
/// `sort_by` and `sort_order` are kept as given; the query builder resolves
/// them against its allowlist and falls back to newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    pub item_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub action: Option<AuditAction>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl HistoryFilter {
    /// Parse and validate raw filter input.
    ///
    /// Blank strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field.
    pub fn parse(query: &HistoryQuery) -> Result<Self, CoreError> {
        let filter = Self {
            item_id: non_blank(query.item_id.as_deref())
                .map(|raw| parse_uuid("item_id", raw))
                .transpose()?,
            user_id: non_blank(query.user_id.as_deref())
                .map(|raw| parse_uuid("user_id", raw))
                .transpose()?,
            action: non_blank(query.action.as_deref())
                .map(AuditAction::parse)
                .transpose()?,
            from: non_blank(query.from.as_deref())
                .map(|raw| parse_timestamp("from", raw))
                .transpose()?,
            to: non_blank(query.to.as_deref())
                .map(|raw| parse_timestamp("to", raw))
                .transpose()?,
            sort_by: non_blank(query.sort_by.as_deref()).map(str::to_string),
            sort_order: non_blank(query.sort_order.as_deref()).map(str::to_string),
            limit: query.limit,
            offset: query.offset,
        };
        filter.validate()?;
        Ok(filter)
    }

    /// Check cross-field constraints on an already-typed filter.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `from` is after `to`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err(CoreError::Validation(
                "'from' must not be after 'to'".to_string(),
            ));
        }
        Ok(())
    }

    /// Filter scoped to a single item, newest first.
    #[must_use]
    pub fn for_item(item_id: Uuid) -> Self {
        Self {
            item_id: Some(item_id),
            ..Self::default()
        }
    }
}

/// Parse a UUID argument, naming `field` in the error.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `raw` is not a UUID.
pub fn parse_uuid(field: &str, raw: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| CoreError::Validation(format!("invalid {field} '{raw}': expected a UUID")))
}

fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| {
            CoreError::Validation(format!("invalid {field} '{raw}': expected an RFC 3339 timestamp"))
        })
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}
