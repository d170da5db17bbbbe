//! Row-to-entity parsing helpers.
//!
//! Timestamps are stored as millisecond UTC text (`YYYY-MM-DDTHH:MM:SS.sssZ`)
//! so that text comparison in SQL is chronological.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use uuid::Uuid;
use wh_core::entities::Snapshot;

use crate::error::DatabaseError;

const NANOS_PER_MILLI: u32 = 1_000_000;

/// Format a timestamp the way the schema stores it.
#[must_use]
pub fn format_datetime(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Like [`format_datetime`], but a sub-millisecond remainder rounds up.
///
/// Used for inclusive lower bounds, which must not admit stored values that
/// are earlier than the requested instant.
#[must_use]
pub fn format_datetime_ceil(ts: &DateTime<Utc>) -> String {
    let remainder = ts.timestamp_subsec_nanos() % NANOS_PER_MILLI;
    let rounded = if remainder == 0 {
        *ts
    } else {
        ts.checked_add_signed(TimeDelta::nanoseconds(i64::from(NANOS_PER_MILLI - remainder)))
            .unwrap_or(*ts)
    };
    format_datetime(&rounded)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Accepts RFC 3339 and `SQLite`'s `datetime('now')` format.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column holding a UUID.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the stored value is not a UUID.
pub fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::InvalidState(format!("bad UUID '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all wh-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Parse an optional snapshot column (a JSON object stored as TEXT).
///
/// The error never includes the column contents.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the text is not a JSON object.
pub fn parse_snapshot(s: Option<&str>) -> Result<Option<Snapshot>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => match serde_json::from_str(s) {
            Ok(serde_json::Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(DatabaseError::InvalidState(
                "snapshot column is not a JSON object".into(),
            )),
            Err(e) => Err(DatabaseError::InvalidState(format!(
                "snapshot column is not valid JSON at line {} column {}",
                e.line(),
                e.column()
            ))),
        },
        _ => Ok(None),
    }
}
