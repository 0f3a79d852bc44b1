//! Catalog diff engine.
//!
//! Compares a "before" and an "after" [`RecordSet`](crate::model::RecordSet)
//! and lazily yields the CREATE / UPDATE / DELETE operations that bring a
//! downstream system from the first snapshot to the second.
//!
//! ## Entry point
//!
//! ```
//! use catdiff_core::diff::{CatalogDiffer, DiffOptions};
//! use catdiff_core::model::{DuplicatePolicy, Fields, Record, RecordSet};
//!
//! let row = |id: &str| -> Record {
//!     let mut fields = Fields::new();
//!     fields.insert("id".to_string(), id.to_string());
//!     Record::new(id, fields)
//! };
//! let before = RecordSet::from_records(vec![row("1"), row("2")], DuplicatePolicy::Reject).unwrap();
//! let after = RecordSet::from_records(vec![row("2"), row("3")], DuplicatePolicy::Reject).unwrap();
//!
//! let differ = CatalogDiffer::new(DiffOptions::default());
//! let kinds: Vec<String> = differ
//!     .diff(&before, &after)
//!     .map(|op| format!("{} {}", op.kind(), op.id()))
//!     .collect();
//! assert_eq!(kinds, vec!["DELETE 1", "UPDATE 2", "CREATE 3"]);
//! ```
//!
//! ## Guarantees
//!
//! - **Ordering**: operations derived from `before` (UPDATE/DELETE) come first
//!   in `before` order, then CREATEs in `after` order.
//! - **Completeness**: every id of `before ∪ after` is emitted exactly once,
//!   unless strict change detection drops it as unchanged.
//! - **Determinism**: identical inputs yield identical streams.
//! - **Laziness**: each operation is computed when pulled; dropping the
//!   iterator early is always safe.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{diff, CatalogDiffer, Diff, DiffOptions};
pub use human_summary::render_human_summary;
pub use model::{DiffClassification, DiffIdentity, DiffSummary, OperationCounts};
