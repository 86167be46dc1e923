//! Integration tests for the worksheet lookup merge
//!
//! Worksheets are written as CSV exports into a temporary directory and the
//! merged output is read back as plain text.

use record_validator::Error;
use record_validator::app::services::sheet_merge::{CopyColumn, MergeSpec, merge_sheets};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write worksheet");
    path
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open merged output");
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    let mut rows = vec![header];
    for record in reader.records() {
        rows.push(record.unwrap().iter().map(String::from).collect());
    }
    rows
}

/// Default columns: target key I, source key B, E and D copied across
#[test]
fn test_default_merge_marks_unmatched_rows() {
    let dir = TempDir::new().unwrap();
    let target = write(
        dir.path(),
        "IBUSRQDC1.csv",
        "A,I\nrow1,CIF003\nrow2,CIF404\nrow3,CIF001\n",
    );
    let source = write(
        dir.path(),
        "sm.csv",
        "B,D,E\nCIF001,d-one,e-one\nCIF002,d-two,e-two\nCIF003,d-three,e-three\n",
    );
    let output = dir.path().join("merged.csv");

    let spec = MergeSpec::new(&target, &source).with_output_path(&output);
    let summary = merge_sheets(&spec).unwrap();

    assert_eq!(summary.target_rows, 3);
    assert_eq!(summary.matched_rows, 2);
    assert_eq!(summary.unmatched_rows, 1);
    assert_eq!(summary.output_columns, 4);

    let rows = read_rows(&output);
    assert_eq!(rows[0], vec!["A", "I", "B (from E)", "C (from D)"]);
    assert_eq!(rows[1], vec!["row1", "CIF003", "e-three", "d-three"]);
    assert_eq!(rows[2], vec!["row2", "CIF404", "Not Found", "Not Found"]);
    assert_eq!(rows[3], vec!["row3", "CIF001", "e-one", "d-one"]);
}

/// Custom keys and copied column names
#[test]
fn test_merge_with_custom_columns() {
    let dir = TempDir::new().unwrap();
    let target = write(dir.path(), "target.csv", "cif,amount\n7,100\n8,200\n");
    let source = write(dir.path(), "source.csv", "id,name\n8,Tui\n7,Sione\n");
    let output = dir.path().join("out.csv");

    let spec = MergeSpec::new(&target, &source)
        .with_output_path(&output)
        .with_keys("cif", "id")
        .with_copies(vec![CopyColumn::new("name", "customer")]);
    let summary = merge_sheets(&spec).unwrap();

    assert_eq!(summary.unmatched_rows, 0);
    assert_eq!(summary.match_rate(), 100.0);
    let rows = read_rows(&output);
    assert_eq!(rows[0], vec!["cif", "amount", "customer"]);
    assert_eq!(rows[1], vec!["7", "100", "Sione"]);
    assert_eq!(rows[2], vec!["8", "200", "Tui"]);
}

/// Keys are compared as text, so leading zeros matter
#[test]
fn test_merge_keys_compare_as_text() {
    let dir = TempDir::new().unwrap();
    let target = write(dir.path(), "target.csv", "I\n007\n7\n");
    let source = write(dir.path(), "source.csv", "B,D,E\n007,d,e\n");
    let output = dir.path().join("out.csv");

    let summary = merge_sheets(&MergeSpec::new(&target, &source).with_output_path(&output)).unwrap();

    assert_eq!(summary.matched_rows, 1);
    let rows = read_rows(&output);
    assert_eq!(rows[1], vec!["007", "e", "d"]);
    assert_eq!(rows[2], vec!["7", "Not Found", "Not Found"]);
}

/// A missing source worksheet fails without writing an output
#[test]
fn test_missing_source_worksheet() {
    let dir = TempDir::new().unwrap();
    let target = write(dir.path(), "target.csv", "I\nx\n");
    let output = dir.path().join("out.csv");

    let spec = MergeSpec::new(&target, dir.path().join("absent.csv")).with_output_path(&output);
    let err = merge_sheets(&spec).unwrap_err();

    assert!(matches!(err, Error::Worksheet { .. }));
    assert!(!output.exists());
}

/// A source worksheet without the copied column is rejected
#[test]
fn test_missing_copied_column() {
    let dir = TempDir::new().unwrap();
    let target = write(dir.path(), "target.csv", "I\nx\n");
    let source = write(dir.path(), "source.csv", "B,E\nx,e\n");
    let output = dir.path().join("out.csv");

    let err = merge_sheets(&MergeSpec::new(&target, &source).with_output_path(&output)).unwrap_err();
    assert!(err.to_string().contains("missing column 'D'"));
}
