//! Record loader tests: JSON files and the SQLite record table.

use emnc_core::{
    dataset,
    error::EngineError,
    loader::{self, json, sqlite::RecordTable},
};
use std::path::PathBuf;

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("emnc-{}-{name}", std::process::id()));
    std::fs::write(&path, content).expect("write temp file");
    path
}

#[test]
fn json_file_round_trips_into_store() {
    let path = temp_file("records.json", include_str!("../../data/records.json"));
    let records = json::load_records(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let store = loader::into_store(records).unwrap();
    assert_eq!(store.len(), 9);
    assert_eq!(store.by_year(2018).unwrap().china, 129);
}

/// A record without D_ESG is rejected, not defaulted.
#[test]
fn json_missing_field_is_validation_error() {
    let content = r#"[{"year": 2016, "USA": 126, "China": 98, "India": 8, "EMNC_total": 60,
        "OFDI": 300, "IFDI": 400, "Greenfield": 150, "M_and_A": 200,
        "GDP_share": 45.0, "GDP_growth": 4.8, "Billionaire_count": 3500}]"#;
    let path = temp_file("missing.json", content);
    let err = json::load_records(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, EngineError::Validation { .. }), "got {err}");
    assert!(err.to_string().contains("D_ESG"), "message should name the field: {err}");
}

#[test]
fn json_negative_count_is_validation_error() {
    let content = r#"[{"year": 2016, "USA": -1, "China": 98, "India": 8, "EMNC_total": 60,
        "OFDI": 300, "IFDI": 400, "Greenfield": 150, "M_and_A": 200,
        "GDP_share": 45.0, "GDP_growth": 4.8, "D_ESG": 50, "Billionaire_count": 3500}]"#;
    let err = json::parse_records(content).unwrap_err();
    assert!(matches!(err, EngineError::Validation { .. }), "got {err}");
}

#[test]
fn json_unreadable_file_is_not_validation() {
    let err = json::load_records("/definitely/not/here.json").unwrap_err();
    assert!(!matches!(err, EngineError::Validation { .. }), "got {err}");
}

#[test]
fn sqlite_table_round_trip() {
    let table = RecordTable::in_memory().unwrap();
    table.migrate().unwrap();

    let records = dataset::builtin_records().unwrap();
    for r in records.iter().rev() {
        table.insert_record(r).unwrap();
    }
    assert_eq!(table.record_count().unwrap(), 9);

    let loaded = table.load_records().unwrap();
    assert_eq!(loaded, records, "rows come back in year order, values intact");
}

/// Seeds the first two built-in years into a file-backed table, then runs
/// `sql` through a second connection so the table sees the edit on load.
fn tampered_table(name: &str, sql: &str) -> (RecordTable, PathBuf) {
    let path = std::env::temp_dir().join(format!("emnc-{}-{name}.db", std::process::id()));
    std::fs::remove_file(&path).ok();
    let path_str = path.to_str().expect("utf-8 temp path");

    let table = RecordTable::open(path_str).unwrap();
    table.migrate().unwrap();
    for r in dataset::builtin_records().unwrap().iter().take(2) {
        table.insert_record(r).unwrap();
    }

    let conn = rusqlite::Connection::open(path_str).unwrap();
    conn.execute(sql, []).unwrap();
    drop(conn);
    (table, path)
}

#[test]
fn sqlite_null_column_is_validation_error() {
    let (table, path) =
        tampered_table("null", "UPDATE year_record SET gdp_growth = NULL WHERE year = 2017");
    let err = table.load_records().unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, EngineError::Validation { .. }), "got {err}");
    assert!(err.to_string().contains("gdp_growth"), "{err}");
    assert!(err.to_string().contains("2017"), "{err}");
}

/// Text in a REAL column is a bad dataset, not a database fault.
#[test]
fn sqlite_text_amount_is_validation_error() {
    let (table, path) =
        tampered_table("text", "UPDATE year_record SET ofdi = 'abc' WHERE year = 2016");
    let err = table.load_records().unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, EngineError::Validation { .. }), "got {err}");
    assert!(err.to_string().contains("ofdi"), "{err}");
    assert!(err.to_string().contains("2016"), "{err}");
}

/// Counts are unsigned; a negative stored count is rejected with its column.
#[test]
fn sqlite_negative_count_is_validation_error() {
    let (table, path) =
        tampered_table("negative", "UPDATE year_record SET usa = -5 WHERE year = 2017");
    let err = table.load_records().unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, EngineError::Validation { .. }), "got {err}");
    assert!(err.to_string().contains("usa"), "{err}");
    assert!(err.to_string().contains("2017"), "{err}");
    assert!(err.to_string().contains("-5"), "{err}");
}

#[test]
fn sqlite_duplicate_year_is_rejected_by_schema() {
    let table = RecordTable::in_memory().unwrap();
    table.migrate().unwrap();
    let r = dataset::builtin_records().unwrap().remove(0);
    table.insert_record(&r).unwrap();

    let err = table.insert_record(&r).unwrap_err();
    assert!(matches!(err, EngineError::Database(_)), "got {err}");
}

/// A failed bulk insert leaves the table as it was.
#[test]
fn sqlite_bulk_insert_is_all_or_nothing() {
    let mut table = RecordTable::in_memory().unwrap();
    table.migrate().unwrap();
    let records = dataset::builtin_records().unwrap();
    table.insert_record(&records[4]).unwrap();

    let err = table.insert_records(&records).unwrap_err();
    assert!(matches!(err, EngineError::Database(_)), "got {err}");
    assert_eq!(table.record_count().unwrap(), 1, "earlier rows rolled back");

    let loaded = table.load_records().unwrap();
    assert_eq!(loaded, vec![records[4].clone()]);
}
