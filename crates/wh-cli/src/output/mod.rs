use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};
use wh_core::export::write_csv;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table::TableOptions::from_env()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Csv => render_csv(value),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Write raw bytes to stdout unchanged.
pub fn output_bytes(bytes: &[u8]) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}

/// List responses are `{ <rows>: [...], total }`; tabular formats show the rows.
fn rows_of(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut arrays = map.values().filter(|v| v.is_array());
            let only = match (arrays.next(), arrays.next()) {
                (Some(rows), None) => Some(rows.clone()),
                _ => None,
            };
            only.unwrap_or(Value::Object(map))
        }
        other => other,
    }
}

fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    match rows_of(serde_json::to_value(value)?) {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let headers = ["field", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options))
        }
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let headers = union_headers(items);
    if headers.is_empty() {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

/// CSV through the shared exporter. Rows missing a column get an empty cell.
///
/// Columns come from the rendered rows, so an empty list renders as an empty
/// string with no header line. `history export` writes its typed rows through
/// the exporter directly and always gets a header.
fn render_csv<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let rows = match rows_of(serde_json::to_value(value)?) {
        Value::Array(items) => items,
        single @ Value::Object(_) => vec![single],
        scalar => anyhow::bail!("cannot render {scalar} as CSV"),
    };
    if rows.is_empty() {
        return Ok(String::new());
    }

    let headers = union_headers(&rows);
    let normalized = rows
        .iter()
        .map(|row| {
            let map = row.as_object();
            let aligned: Map<String, Value> = headers
                .iter()
                .map(|h| (h.clone(), map.and_then(|m| m.get(h)).cloned().unwrap_or(Value::Null)))
                .collect();
            Value::Object(aligned)
        })
        .collect::<Vec<_>>();

    let bytes = write_csv(Vec::new(), Some(headers.as_slice()), &normalized)?;
    let text = String::from_utf8(bytes)?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// Column names in first-seen order across all object rows.
fn union_headers(items: &[Value]) -> Vec<String> {
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}
