//! Generic CSV export over serializable row structs.
//!
//! Any `Serialize` struct can be exported. The header row comes from the
//! struct's serialized field names in declaration order, with the first
//! letter lowercased. Each field value is rendered through [`format_value`],
//! the single formatting table for every exported type:
//!
//! | Value | Rendering |
//! |---|---|
//! | `Uuid` | canonical lowercase hyphenated form (its own serde output) |
//! | `DateTime<Utc>` tagged with [`timestamp`] | UTC, whole seconds, `Z` suffix |
//! | floating-point number | fixed notation, two decimals |
//! | string | as-is |
//! | integer, bool | decimal / `true` / `false` |
//! | null / `None` | empty cell |
//! | array, map | compact JSON |
//!
//! An empty record slice produces a header-only document whose columns are
//! taken from `T::default()`. Output is built in memory and only returned
//! once every row has been written.
//!
//! Strings are never reinterpreted, so a text field that happens to look like
//! a UUID or a timestamp is exported byte for byte. Timestamp fields opt into
//! the fixed format with `#[serde(serialize_with = "wh_core::export::timestamp")]`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while exporting rows.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The row type does not serialize as a struct/map.
    #[error("export rows must serialize as structs, got {0}")]
    NotARecord(&'static str),

    /// A row serialized a different number of fields than the header.
    #[error("row has {found} fields but the header has {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Serializing a row to an intermediate value failed.
    #[error("failed to serialize export row: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV writer rejected a record.
    #[error("failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// The in-memory buffer could not be finalized.
    #[error("failed to finalize CSV output: {0}")]
    Flush(String),
}

/// Derive the header row from a sample record.
///
/// # Errors
///
/// Returns `ExportError::NotARecord` if `sample` does not serialize as a struct.
pub fn column_names<T: Serialize>(sample: &T) -> Result<Vec<String>, ExportError> {
    Ok(fields(sample)?
        .into_iter()
        .map(|(name, _)| lower_first(&name))
        .collect())
}

/// Render one record as CSV cells in field declaration order.
///
/// # Errors
///
/// Returns `ExportError::NotARecord` if `record` does not serialize as a struct.
pub fn record_values<T: Serialize>(record: &T) -> Result<Vec<String>, ExportError> {
    Ok(fields(record)?
        .into_iter()
        .map(|(_, value)| format_value(&value))
        .collect())
}

/// Format a single serialized value for a CSV cell.
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => format!("{float:.2}"),
            _ => number.to_string(),
        },
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Write `records` as CSV into `out`, using `columns` as the header when given.
///
/// When `columns` is `None` the header is derived from the first record, or
/// from `T::default()` when there are no records.
///
/// # Errors
///
/// Returns `ExportError` if a row is not a struct, has a different field count
/// than the header, or the writer fails.
pub fn write_csv<W, T>(out: W, columns: Option<&[String]>, records: &[T]) -> Result<W, ExportError>
where
    W: std::io::Write,
    T: Serialize + Default,
{
    let header = match columns {
        Some(columns) => columns.to_vec(),
        None => match records.first() {
            Some(first) => column_names(first)?,
            None => column_names(&T::default())?,
        },
    };

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&header)?;

    for record in records {
        let values = record_values(record)?;
        if values.len() != header.len() {
            return Err(ExportError::ShapeMismatch {
                expected: header.len(),
                found: values.len(),
            });
        }
        writer.write_record(&values)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))
}

/// Export `records` to a complete CSV document.
///
/// # Errors
///
/// See [`write_csv`]. No bytes are returned on error.
pub fn to_csv<T: Serialize + Default>(records: &[T]) -> Result<Vec<u8>, ExportError> {
    write_csv(Vec::new(), None, records)
}

fn fields<T: Serialize>(record: &T) -> Result<Vec<(String, Value)>, ExportError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Err(ExportError::NotARecord("null")),
        Value::Bool(_) => Err(ExportError::NotARecord("bool")),
        Value::Number(_) => Err(ExportError::NotARecord("number")),
        Value::String(_) => Err(ExportError::NotARecord("string")),
        Value::Array(_) => Err(ExportError::NotARecord("array")),
    }
}

/// `serialize_with` helper for export timestamp columns.
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}
