use catdiff_core_types::RequestId;
use thiserror::Error;

/// Result type alias using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and process-level reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input shape
    InvalidInput,
    /// Two records in one snapshot share an id
    DuplicateIdentifier,
    /// A required column (usually the id column) is absent
    MissingField,
    /// A data row does not line up with the header row
    MalformedRow,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::DuplicateIdentifier => "ERR_DUPLICATE_IDENTIFIER",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::MalformedRow => "ERR_MALFORMED_ROW",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, record id, source path and line) for humans.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record_id: Option<String>,
    path: Option<String>,
    line: Option<u64>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_id: None,
            path: None,
            line: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record ID context
    pub fn with_record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    /// Add source path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add 1-based line number context
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            match self.line {
                Some(line) => write!(f, " ({}:{})", path, line)?,
                None => write!(f, " ({})", path)?,
            }
        } else if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        if let Some(record_id) = &self.record_id {
            write!(f, " (record_id: {})", record_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised while building record sets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two records in the same snapshot share an id
    #[error("Duplicate identifier in record set: {id}")]
    DuplicateIdentifier { id: String },

    /// The configured id column is not present in the record
    #[error("Identifier column '{column}' not found in record")]
    MissingIdColumn { column: String },

    /// A record has no fields at all, so no id can be taken from it
    #[error("Record has no fields")]
    EmptyRecord,
}

impl From<CatalogError> for ExError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::DuplicateIdentifier { id } => {
                ExError::new(ExErrorKind::DuplicateIdentifier)
                    .with_op("record_set_insert")
                    .with_record_id(id)
                    .with_message(message)
            }
            CatalogError::MissingIdColumn { .. } => ExError::new(ExErrorKind::MissingField)
                .with_op("record_from_fields")
                .with_message(message),
            CatalogError::EmptyRecord => ExError::new(ExErrorKind::InvalidInput)
                .with_op("record_from_fields")
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_context() {
        let err = ExError::new(ExErrorKind::MalformedRow)
            .with_op("load_record_set")
            .with_path("before.csv")
            .with_line(4)
            .with_message("expected 3 fields, found 2");

        assert_eq!(
            err.to_string(),
            "[ERR_MALFORMED_ROW] in operation 'load_record_set': expected 3 fields, found 2 (before.csv:4)"
        );
    }

    #[test]
    fn test_display_line_without_path() {
        let err = ExError::new(ExErrorKind::InvalidInput).with_line(2);
        assert_eq!(err.to_string(), "[ERR_INVALID_INPUT] (line: 2)");
    }

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::DuplicateIdentifier,
            ExErrorKind::MissingField,
            ExErrorKind::MalformedRow,
            ExErrorKind::InvalidConfig,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }
}
