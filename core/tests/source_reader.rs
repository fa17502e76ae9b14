//! Source reader tests: header handling, grouping, malformed input.

use interdb_core::{
    error::ConvertError,
    source::{parse_line, read_from, read_interactions},
};
use std::io::Cursor;
use std::path::{Path, PathBuf};

const HEADER: &str = "\"ATC1\";\"Name1\";\"ATC2\";\"Name2\";\"Info\";\"Mechanismus\";\"Effekt\";\"Massnahmen\";\"Grad\"";

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/interactions_sample.csv")
}

fn line(atc1: &str, atc2: &str, grade: &str) -> String {
    format!("\"{atc1}\";\"Name {atc1}\";\"{atc2}\";\"Name {atc2}\";\"Info\";\"Mech\";\"Effekt\";\"Massnahmen\";\"{grade}\"")
}

#[test]
fn fixture_groups_by_atc1_in_sorted_order() {
    let outcome = read_interactions(&fixture()).expect("fixture readable");
    let keys: Vec<&str> = outcome.group.keys().collect();
    assert_eq!(keys, ["B01AC", "J01FA", "N02BE", "m01ae"]);
    assert_eq!(outcome.group.record_count(), 7);
    assert_eq!(outcome.lines_read, 7);
    assert!(outcome.skipped.is_empty());
    assert!(outcome.interrupted.is_none());
}

/// The header is skipped outright, so no artifact key survives.
#[test]
fn header_line_never_becomes_a_group() {
    let outcome = read_interactions(&fixture()).unwrap();
    assert!(outcome.group.get("ATC1").is_none());
    assert!(outcome.group.get("TC").is_none());
}

#[test]
fn every_record_lands_in_exactly_its_own_group() {
    let outcome = read_interactions(&fixture()).unwrap();
    let mut total = 0;
    for (key, records) in outcome.group.iter() {
        for record in records {
            assert_eq!(record.atc1_code, key);
        }
        total += records.len();
    }
    assert_eq!(total, outcome.group.record_count());
}

#[test]
fn records_keep_file_order_within_a_key() {
    let outcome = read_interactions(&fixture()).unwrap();
    let atc2: Vec<&str> = outcome
        .group
        .get("N02BE")
        .unwrap()
        .iter()
        .map(|r| r.atc2_code.as_str())
        .collect();
    assert_eq!(atc2, ["B01AC", "B01AA", "J04AB"]);
}

#[test]
fn malformed_lines_are_skipped_and_counted() {
    let input = [
        HEADER.to_string(),
        line("N02BE", "B01AC", "B"),
        "\"N02BE\";\"Paracetamol\";\"B01AA\"".to_string(),
        line("N02BE", "J04AB", "D"),
        line("A10BA", "C09AA", "C").replace("\"Info\"", ""),
    ]
    .join("\n");

    let outcome = read_from(Cursor::new(input));
    assert_eq!(outcome.group.record_count(), 2);
    assert_eq!(outcome.lines_read, 4);
    let lines: Vec<usize> = outcome.skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, [3, 5]);
    assert!(outcome.group.get("A10BA").is_none());
}

#[test]
fn blank_lines_are_ignored_silently() {
    let input = format!("{HEADER}\n\n{}\n   \n{}\n", line("A", "B", "A"), line("A", "C", "B"));
    let outcome = read_from(Cursor::new(input));
    assert_eq!(outcome.group.record_count(), 2);
    assert!(outcome.skipped.is_empty());
}

#[test]
fn header_only_input_gives_empty_group() {
    let outcome = read_from(Cursor::new(HEADER));
    assert!(outcome.group.is_empty());
    assert_eq!(outcome.lines_read, 0);
}

#[test]
fn missing_file_is_an_explicit_error() {
    let err = read_interactions(Path::new("does/not/exist.csv")).unwrap_err();
    match err {
        ConvertError::Source { path, .. } => assert_eq!(path, Path::new("does/not/exist.csv")),
        other => panic!("unexpected error: {other}"),
    }
}

/// A line that is not valid UTF-8 is skipped; the lines after it still load.
#[test]
fn invalid_utf8_line_is_skipped_and_scan_continues() {
    let mut bytes = format!("{HEADER}\n{}\n", line("A01", "B01", "A")).into_bytes();
    bytes.extend_from_slice(b"\"A02\";\"Pr\xe4parat\";\"B01\";\"x\";\"i\";\"m\";\"e\";\"m\";\"B\"\n");
    for key in ["A03", "A04", "A05"] {
        bytes.extend_from_slice(format!("{}\n", line(key, "B01", "C")).as_bytes());
    }

    let outcome = read_from(Cursor::new(bytes));
    assert_eq!(outcome.group.record_count(), 4);
    assert!(outcome.group.get("A02").is_none());
    assert!(outcome.interrupted.is_none());
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].line, 3);
    assert!(outcome.skipped[0].reason.contains("UTF-8"), "{}", outcome.skipped[0].reason);
    assert_eq!(outcome.lines_read, 5);
}

#[test]
fn crlf_line_endings_are_stripped() {
    let input = format!("{HEADER}\r\n{}\r\n{}\r\n", line("A", "B", "A"), line("A", "C", "X"));
    let outcome = read_from(Cursor::new(input));
    let grades: Vec<&str> = outcome
        .group
        .get("A")
        .unwrap()
        .iter()
        .map(|r| r.risk_grade.as_str())
        .collect();
    assert_eq!(grades, ["A", "X"]);
    assert!(outcome.skipped.is_empty());
}

/// Unquoting every fixture line and quoting the fields again gives back the line.
#[test]
fn fixture_lines_survive_requoting() {
    let content = std::fs::read_to_string(fixture()).unwrap();
    let mut checked = 0;
    for (idx, raw) in content.lines().enumerate().skip(1) {
        if raw.trim().is_empty() {
            continue;
        }
        let record = parse_line(raw, idx + 1).unwrap();
        let requoted = record
            .fields()
            .iter()
            .map(|f| format!("\"{f}\""))
            .collect::<Vec<_>>()
            .join(";");
        assert_eq!(requoted, raw, "line {}", idx + 1);
        checked += 1;
    }
    assert_eq!(checked, 7);
}
