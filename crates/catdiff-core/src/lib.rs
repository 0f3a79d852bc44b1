//! catdiff core - catalog snapshot diffing
//!
//! This crate provides:
//! - The record model: [`RecordId`], [`Record`], [`RecordSet`]
//! - [`CatalogDiffer`], a lazy CREATE/UPDATE/DELETE operation stream between
//!   two snapshots
//! - Diff summaries and their Markdown rendering
//! - The error facility and the structured logging facility shared by the
//!   loader and the CLI
//!
//! Reading files and dispatching operations live in `catdiff-store`.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use diff::{diff, CatalogDiffer, Diff, DiffOptions, DiffSummary, OperationCounts};
pub use errors::{CatalogError, ExError, ExErrorKind, Result};
pub use model::{
    DuplicatePolicy, Fields, Operation, OperationKind, OwnedOperation, Record, RecordId,
    RecordSet,
};
