//! History query builder.
//!
//! Turns a validated [`HistoryFilter`] into a `WHERE` clause, its positional
//! parameters, and an `ORDER BY` clause. Clause text is fixed grammar plus
//! allowlisted column names; filter values only ever travel as parameters.
//!
//! ```text
//! WHERE item_id = ?1 AND user_id = ?2 AND action = ?3
//!   AND changed_at >= ?4 AND changed_at <= ?5
//! ORDER BY <changed_at|action|user_id> <ASC|DESC>, seq <ASC|DESC>
//! ```

use libsql::Value;
use wh_core::filter::HistoryFilter;

use crate::helpers::{format_datetime, format_datetime_ceil};

/// Sort column used when none is given or the given one is not allowed.
pub const DEFAULT_SORT_COLUMN: &str = "changed_at";

const SORTABLE_COLUMNS: [&str; 3] = ["changed_at", "action", "user_id"];

/// Parameterized pieces of a history query.
#[derive(Debug, Clone)]
pub struct HistoryQueryParts {
    /// Empty, or `WHERE ...` with `?n` placeholders.
    pub where_clause: String,
    pub params: Vec<Value>,
    /// `ORDER BY ...` with a `seq` tiebreaker in the same direction.
    pub order_clause: String,
}

impl HistoryQueryParts {
    /// `LIMIT`/`OFFSET` clause and the full parameter list for the data query.
    ///
    /// Placeholders continue after the filter parameters. A missing limit
    /// means no limit.
    #[must_use]
    pub fn paginated(&self, limit: Option<u32>, offset: Option<u32>) -> (String, Vec<Value>) {
        let mut params = self.params.clone();
        params.push(Value::Integer(limit.map_or(-1, i64::from)));
        let limit_idx = params.len();
        params.push(Value::Integer(offset.map_or(0, i64::from)));
        let offset_idx = params.len();
        (format!("LIMIT ?{limit_idx} OFFSET ?{offset_idx}"), params)
    }
}

/// Build the predicate, parameters, and ordering for `filter`.
#[must_use]
pub fn build(filter: &HistoryFilter) -> HistoryQueryParts {
    let mut conditions = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(item_id) = filter.item_id {
        params.push(Value::Text(item_id.to_string()));
        conditions.push(format!("item_id = ?{}", params.len()));
    }
    if let Some(user_id) = filter.user_id {
        params.push(Value::Text(user_id.to_string()));
        conditions.push(format!("user_id = ?{}", params.len()));
    }
    if let Some(action) = filter.action {
        params.push(Value::Text(action.as_str().to_string()));
        conditions.push(format!("action = ?{}", params.len()));
    }
    if let Some(from) = filter.from {
        params.push(Value::Text(format_datetime_ceil(&from)));
        conditions.push(format!("changed_at >= ?{}", params.len()));
    }
    if let Some(to) = filter.to {
        params.push(Value::Text(format_datetime(&to)));
        conditions.push(format!("changed_at <= ?{}", params.len()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let column = sort_column(filter.sort_by.as_deref());
    let direction = sort_direction(filter.sort_order.as_deref());

    HistoryQueryParts {
        where_clause,
        params,
        order_clause: format!("ORDER BY {column} {direction}, seq {direction}"),
    }
}

/// Resolve a requested sort field through the allowlist.
#[must_use]
pub fn sort_column(requested: Option<&str>) -> &'static str {
    requested
        .map(|raw| raw.trim().to_ascii_lowercase())
        .and_then(|raw| SORTABLE_COLUMNS.into_iter().find(|col| *col == raw))
        .unwrap_or(DEFAULT_SORT_COLUMN)
}

/// Normalize a sort direction; anything other than `asc`/`desc` is `DESC`.
#[must_use]
pub fn sort_direction(requested: Option<&str>) -> &'static str {
    match requested.map(|raw| raw.trim().to_ascii_uppercase()).as_deref() {
        Some("ASC") => "ASC",
        _ => "DESC",
    }
}
