//! Source reader for the semicolon-delimited interactions file.
//!
//! Line layout (after one header line):
//!   "ATC1";"Name1";"ATC2";"Name2";"Info";"Mechanismus";"Effekt";"Massnahmen";"Grad"
//!
//! Each field carries one quote character on either side. Malformed lines
//! are skipped and reported; they never abort the scan.

use crate::{
    error::{ConvertError, ConvertResult},
    types::{InteractionGroup, InteractionRecord},
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const FIELD_SEPARATOR: char = ';';

/// Key plus the eight payload fields.
pub const FIELDS_PER_RECORD: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

/// Everything one scan of the input produced.
#[derive(Debug, Clone, Default)]
pub struct ReadOutcome {
    pub group: InteractionGroup,
    /// Data lines seen, header excluded.
    pub lines_read: usize,
    pub skipped: Vec<SkippedLine>,
    /// Set when a read error stopped the scan early.
    pub interrupted: Option<String>,
}

/// Open `path` and scan it. Failure to open is returned to the caller;
/// everything after that is captured in the outcome.
pub fn read_interactions(path: &Path) -> ConvertResult<ReadOutcome> {
    let file = File::open(path).map_err(|source| ConvertError::Source {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Reading interactions from {}", path.display());
    Ok(read_from(BufReader::new(file)))
}

/// Scan any buffered reader. The first line is the header and is discarded.
///
/// Lines are decoded one at a time: a line that is not valid UTF-8 is
/// skipped like any other malformed line. Only an I/O error ends the scan.
pub fn read_from<R: BufRead>(mut reader: R) -> ReadOutcome {
    let mut outcome = ReadOutcome::default();
    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => line_no += 1,
            Err(e) => {
                let line_no = line_no + 1;
                log::error!(">> InteractionsDB: error in processing file at line {line_no}: {e}");
                outcome.interrupted = Some(format!("line {line_no}: {e}"));
                break;
            }
        }
        if line_no == 1 {
            continue;
        }

        let line = match decode_line(&buf, line_no) {
            Ok(line) => line,
            Err(skipped) => {
                log::warn!("Skipping malformed line {}: {}", skipped.line, skipped.reason);
                outcome.lines_read += 1;
                outcome.skipped.push(skipped);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        outcome.lines_read += 1;

        match parse_line(line, line_no) {
            Ok(record) => records.push(record),
            Err(ConvertError::MalformedLine { line, reason }) => {
                log::warn!("Skipping malformed line {line}: {reason}");
                outcome.skipped.push(SkippedLine { line, reason });
            }
            Err(other) => {
                log::warn!("Skipping line {line_no}: {other}");
                outcome.skipped.push(SkippedLine {
                    line: line_no,
                    reason: other.to_string(),
                });
            }
        }
    }

    outcome.group = records.into_iter().collect();
    outcome
}

/// UTF-8 text of one raw line, without its `\n` or `\r\n` terminator.
fn decode_line(raw: &[u8], line_no: usize) -> Result<&str, SkippedLine> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw).map_err(|e| SkippedLine {
        line: line_no,
        reason: format!("invalid UTF-8: {e}"),
    })
}

/// Parse one data line. `line_no` is only used for error reporting.
pub fn parse_line(line: &str, line_no: usize) -> ConvertResult<InteractionRecord> {
    let raw: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if raw.len() < FIELDS_PER_RECORD {
        return Err(ConvertError::MalformedLine {
            line: line_no,
            reason: format!(
                "expected {FIELDS_PER_RECORD} fields, found {}",
                raw.len()
            ),
        });
    }

    let mut fields = Vec::with_capacity(FIELDS_PER_RECORD);
    for (column, field) in raw.iter().take(FIELDS_PER_RECORD).enumerate() {
        let value = strip_quotes(field).ok_or_else(|| ConvertError::MalformedLine {
            line: line_no,
            reason: format!("field {} is not quote-wrapped: {field:?}", column + 1),
        })?;
        fields.push(value.to_string());
    }

    let fields: [String; FIELDS_PER_RECORD] =
        fields.try_into().map_err(|_| ConvertError::MalformedLine {
            line: line_no,
            reason: "field count changed while unquoting".into(),
        })?;
    let [atc1_code, name1, atc2_code, name2, info, mechanism, effect, measures, risk_grade] =
        fields;
    Ok(InteractionRecord {
        atc1_code,
        name1,
        atc2_code,
        name2,
        info,
        mechanism,
        effect,
        measures,
        risk_grade,
    })
}

/// Drop the first and last character. `None` if there are fewer than two.
pub fn strip_quotes(field: &str) -> Option<&str> {
    let mut chars = field.char_indices();
    let (_, first) = chars.next()?;
    let (last_idx, _) = chars.next_back()?;
    Some(&field[first.len_utf8()..last_idx])
}
