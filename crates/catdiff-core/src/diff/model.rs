//! Diff summary types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.

use crate::model::{OperationKind, RecordSet};
use serde::{Deserialize, Serialize};

/// Per-kind tally of a diff run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCounts {
    pub creates: usize,
    pub updates: usize,
    pub deletes: usize,
    /// Ids present on both sides with identical fields; only non-zero under
    /// strict change detection
    pub unchanged: usize,
}

impl OperationCounts {
    /// Count one emitted operation
    pub fn record(&mut self, kind: OperationKind) {
        match kind {
            OperationKind::Create => self.creates += 1,
            OperationKind::Update => self.updates += 1,
            OperationKind::Delete => self.deletes += 1,
        }
    }

    /// Number of emitted operations
    pub fn total(&self) -> usize {
        self.creates + self.updates + self.deletes
    }
}

/// Whether the two snapshots differ at all
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiffClassification {
    /// Same records, same fields, same order
    Identical,
    Changed,
}

/// Digest identity for both snapshots being diffed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffIdentity {
    pub before_digest: String,
    pub after_digest: String,
}

/// Top-level report of a diff run
///
/// `diff_schema_version` is always 1 for this implementation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffSummary {
    pub diff_schema_version: u32,
    pub identity: DiffIdentity,
    pub classification: DiffClassification,
    pub before_records: usize,
    pub after_records: usize,
    pub counts: OperationCounts,
    pub strict_change_detection: bool,
}

impl DiffSummary {
    /// Assemble a summary from the two inputs and the counts of a finished run
    pub fn new(
        before: &RecordSet,
        after: &RecordSet,
        counts: OperationCounts,
        strict_change_detection: bool,
    ) -> Self {
        let before_digest = before.digest();
        let after_digest = after.digest();
        let classification = if before_digest == after_digest {
            DiffClassification::Identical
        } else {
            DiffClassification::Changed
        };
        Self {
            diff_schema_version: 1,
            identity: DiffIdentity {
                before_digest,
                after_digest,
            },
            classification,
            before_records: before.len(),
            after_records: after.len(),
            counts,
            strict_change_detection,
        }
    }
}
