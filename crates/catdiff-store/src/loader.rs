//! Delimited text loader
//!
//! Reads a header row plus data rows into a [`RecordSet`], keeping row order.
//! Each file is read with its own header row.

use crate::errors::{from_csv, invalid_input, io_error, Result};
use catdiff_core::errors::{ExError, ExErrorKind};
use catdiff_core::{log_op_end, log_op_error, log_op_start};
use catdiff_core::{DuplicatePolicy, Fields, Record, RecordSet};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

const OP_LOAD: &str = "load_record_set";
const OP_READ: &str = "read_record_set";

/// How to turn a delimited file into records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Column holding the record id; the first column when unset
    pub id_column: Option<String>,
    pub delimiter: u8,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            id_column: None,
            delimiter: b',',
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

/// Load a record set from a file on disk
///
/// # Errors
///
/// - `Io` if the file cannot be opened or read
/// - anything [`read_record_set`] reports, with the path attached
pub fn load_record_set(path: &Path, options: &LoaderOptions) -> Result<RecordSet> {
    let start = Instant::now();
    let shown = path.display().to_string();
    log_op_start!(OP_LOAD, path = %shown);

    let result = File::open(path)
        .map_err(|e| io_error(OP_LOAD, e))
        .and_then(|file| read_record_set(file, options))
        .map_err(|e| e.with_path(shown.clone()));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(set) => {
            log_op_end!(
                OP_LOAD,
                duration_ms = duration_ms,
                path = %shown,
                record_count = set.len(),
            );
        }
        Err(e) => {
            log_op_error!(OP_LOAD, e.clone(), duration_ms = duration_ms, path = %shown);
        }
    }
    result
}

/// Read a record set from any byte stream
///
/// The first row is the header. Rows must have exactly as many fields as the
/// header; blank lines are skipped.
///
/// # Errors
///
/// - `InvalidInput` if the header row is missing or repeats a column name
/// - `MissingField` if the configured id column is not in the header
/// - `MalformedRow` if a row's field count differs from the header
/// - `DuplicateIdentifier` under [`DuplicatePolicy::Reject`]
pub fn read_record_set<R: Read>(reader: R, options: &LoaderOptions) -> Result<RecordSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| from_csv(OP_READ, e))?
        .clone();
    if headers.is_empty() {
        return Err(invalid_input(OP_READ, "missing header row").with_line(1));
    }

    let mut seen = HashSet::new();
    if let Some(repeated) = headers.iter().find(|name| !seen.insert(*name)) {
        return Err(invalid_input(
            OP_READ,
            &format!("column '{}' appears more than once in header", repeated),
        )
        .with_line(1));
    }

    let id_column = options.id_column.as_deref();
    if let Some(column) = id_column {
        if !headers.iter().any(|name| name == column) {
            return Err(ExError::new(ExErrorKind::MissingField)
                .with_op(OP_READ)
                .with_message(format!("id column '{}' not found in header", column))
                .with_line(1));
        }
    }

    let mut set = RecordSet::new();
    for row in csv_reader.records() {
        let row = row.map_err(|e| from_csv(OP_READ, e))?;
        let line = row.position().map(|pos| pos.line());

        let fields: Fields = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Record::from_fields(fields, id_column)
            .and_then(|record| set.insert(record, options.duplicate_policy))
            .map_err(|e| {
                let ex = ExError::from(e);
                match line {
                    Some(line) => ex.with_line(line),
                    None => ex,
                }
            })?;
    }

    tracing::debug!(op = OP_READ, record_count = set.len(), "record set read");
    Ok(set)
}

/// Parse a delimiter setting: a single ASCII character, or `tab` / `\t`
///
/// # Errors
///
/// `InvalidConfig` for anything else.
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => {
                    Ok(c as u8)
                }
                _ => Err(ExError::new(ExErrorKind::InvalidConfig)
                    .with_op("parse_delimiter")
                    .with_message(format!(
                        "delimiter must be a single ASCII character or 'tab', got '{}'",
                        value
                    ))),
            }
        }
    }
}
