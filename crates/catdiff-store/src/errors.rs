//! Error handling for catdiff-store
//!
//! Wraps catdiff-core ExError with loader- and sink-specific helpers

use catdiff_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an invalid input error
pub fn invalid_input(operation: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(operation.to_string())
        .with_message(reason.to_string())
}

/// Create a serialization error
pub fn serialization(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Translate a csv::Error, keeping the line it points at
pub fn from_csv(operation: &str, err: csv::Error) -> ExError {
    let line = err.position().map(|pos| pos.line());
    let ex = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => ExError::new(ExErrorKind::MalformedRow).with_message(format!(
            "expected {} fields, found {}",
            expected_len, len
        )),
        csv::ErrorKind::Utf8 { .. } => {
            ExError::new(ExErrorKind::InvalidInput).with_message(err.to_string())
        }
        csv::ErrorKind::Io(io) => ExError::new(ExErrorKind::Io).with_message(io.to_string()),
        _ => ExError::new(ExErrorKind::InvalidInput).with_message(err.to_string()),
    };
    let ex = ex.with_op(operation.to_string());
    match line {
        Some(line) => ex.with_line(line),
        None => ex,
    }
}
