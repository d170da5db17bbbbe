//! CSV exporter output, re-read with a CSV parser.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;
use wh_core::entities::AuditRecord;
use wh_core::enums::AuditAction;
use wh_core::export::to_csv;
use wh_core::responses::HistoryExportRow;

fn parse(bytes: &[u8]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_reader(bytes);
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

fn record(n: u32) -> AuditRecord {
    AuditRecord {
        id: Uuid::new_v4(),
        item_id: Uuid::new_v4(),
        action: AuditAction::Update,
        user_id: if n % 2 == 0 { Some(Uuid::new_v4()) } else { None },
        changed_at: Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, n).unwrap(),
        old_data: json!({"name": "crate", "quantity": n}).as_object().cloned(),
        new_data: json!({"name": "crate, \"large\"", "quantity": n + 1})
            .as_object()
            .cloned(),
    }
}

#[test]
fn history_rows_produce_header_plus_one_line_each() {
    let records: Vec<AuditRecord> = (0..4).map(record).collect();
    let rows: Vec<HistoryExportRow> = records.iter().map(HistoryExportRow::from).collect();

    let bytes = to_csv(&rows).unwrap();
    let (header, parsed) = parse(&bytes);

    assert_eq!(
        header,
        vec!["id", "item_id", "action", "user_id", "changed_at", "old_data", "new_data"]
    );
    assert_eq!(parsed.len(), records.len());

    for (line, rec) in parsed.iter().zip(&records) {
        assert_eq!(line[0], rec.id.to_string());
        assert_eq!(line[1], rec.item_id.to_string());
        assert_eq!(line[2], "update");
        assert_eq!(
            line[3],
            rec.user_id.map(|u| u.to_string()).unwrap_or_default()
        );
        assert_eq!(line[4], rec.changed_at.format("%Y-%m-%dT%H:%M:%SZ").to_string());

        let new_data: serde_json::Value = serde_json::from_str(&line[6]).unwrap();
        assert_eq!(new_data["name"], json!("crate, \"large\""));
    }
}

#[test]
fn empty_history_is_header_only() {
    let bytes = to_csv::<HistoryExportRow>(&[]).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert_eq!(text, "id,item_id,action,user_id,changed_at,old_data,new_data\n");
}

#[derive(Default, Serialize)]
struct Typed {
    #[serde(rename = "ID")]
    id: Uuid,
    #[serde(rename = "At", serialize_with = "wh_core::export::timestamp")]
    at: chrono::DateTime<Utc>,
    ratio: f64,
    count: i32,
    active: bool,
    label: Option<String>,
    tags: Vec<String>,
}

#[test]
fn typed_struct_cells_follow_formatting_rules() {
    let id = Uuid::parse_str("1c0e5f4a-2b3d-4e5f-8a9b-0c1d2e3f4a5b").unwrap();
    let rows = [Typed {
        id,
        at: Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999),
        ratio: 1.0 / 3.0,
        count: -3,
        active: true,
        label: None,
        tags: vec!["a".into(), "b,c".into()],
    }];

    let (header, parsed) = parse(&to_csv(&rows).unwrap());

    assert_eq!(
        header,
        vec!["iD", "at", "ratio", "count", "active", "label", "tags"]
    );
    assert_eq!(
        parsed,
        vec![vec![
            id.to_string(),
            "2026-01-31T23:59:59Z".to_string(),
            "0.33".to_string(),
            "-3".to_string(),
            "true".to_string(),
            String::new(),
            r#"["a","b,c"]"#.to_string(),
        ]]
    );
}

#[derive(Default, Serialize)]
struct Labelled {
    name: String,
    sku: String,
}

#[test]
fn text_that_looks_typed_survives_unchanged() {
    let rows = [Labelled {
        name: "2026-03-01T12:30:45.123+02:00".into(),
        sku: "6F9619FF-8B86-D011-B42D-00CF4FC964FF".into(),
    }];

    let (header, parsed) = parse(&to_csv(&rows).unwrap());

    assert_eq!(header, vec!["name", "sku"]);
    assert_eq!(
        parsed,
        vec![vec![
            "2026-03-01T12:30:45.123+02:00".to_string(),
            "6F9619FF-8B86-D011-B42D-00CF4FC964FF".to_string(),
        ]]
    );
}
