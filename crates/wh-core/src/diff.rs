//! Field-level diffs between two history snapshots.
//!
//! Output is ordered by field name so repeated calls and rendered history
//! are stable. Values are compared structurally; numbers compare by value so
//! `1` and `1.0` are equal.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::Snapshot;

/// One changed, added, or removed field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDiff {
    pub field: String,
    /// `None` when the field was added.
    pub old_value: Option<Value>,
    /// `None` when the field was removed.
    pub new_value: Option<Value>,
}

/// Compute the field-level delta from `old` to `new`.
///
/// Absent snapshots behave like empty maps.
#[must_use]
pub fn diff(old: Option<&Snapshot>, new: Option<&Snapshot>) -> Vec<FieldDiff> {
    let empty = Snapshot::new();
    let old = old.unwrap_or(&empty);
    let new = new.unwrap_or(&empty);

    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    keys.into_iter()
        .filter_map(|key| match (old.get(key), new.get(key)) {
            (None, Some(added)) => Some(FieldDiff {
                field: key.clone(),
                old_value: None,
                new_value: Some(added.clone()),
            }),
            (Some(removed), None) => Some(FieldDiff {
                field: key.clone(),
                old_value: Some(removed.clone()),
                new_value: None,
            }),
            (Some(before), Some(after)) if !values_equal(before, after) => Some(FieldDiff {
                field: key.clone(),
                old_value: Some(before.clone()),
                new_value: Some(after.clone()),
            }),
            _ => None,
        })
        .collect()
}

/// Deep structural equality over JSON values.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            if a == b {
                return true;
            }
            // Two integers of different value never compare through f64.
            if !a.is_f64() && !b.is_f64() {
                return false;
            }
            matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}
