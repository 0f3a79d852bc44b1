//! Catalog diff computation engine.
//!
//! The core entry point is [`CatalogDiffer::diff`], which borrows two record
//! sets and returns a lazy [`Diff`] iterator of [`Operation`]s.

use crate::diff::model::{DiffSummary, OperationCounts};
use crate::model::{Fields, Operation, RecordId, RecordSet};
use crate::{log_op_end, log_op_start};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::time::Instant;

const OP_DIFF: &str = "catalog_diff";

/// Knobs for a diff run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Skip UPDATE for ids whose before and after fields are equal.
    ///
    /// Off by default: every id present on both sides yields an UPDATE
    /// carrying the after fields, changed or not. Field order is ignored
    /// when comparing.
    pub strict_change_detection: bool,
}

/// Computes the operation stream between two catalog snapshots
#[derive(Debug, Clone, Default)]
pub struct CatalogDiffer {
    options: DiffOptions,
}

impl CatalogDiffer {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Lazily diff `before` against `after`
    ///
    /// Both sets are only borrowed; nothing is computed until the returned
    /// iterator is pulled.
    pub fn diff<'a>(&self, before: &'a RecordSet, after: &'a RecordSet) -> Diff<'a> {
        log_op_start!(
            OP_DIFF,
            before_count = before.len(),
            after_count = after.len(),
            strict = self.options.strict_change_detection,
        );
        Diff {
            before,
            after,
            options: self.options,
            phase: Phase::Existing(before.iter()),
            counts: OperationCounts::default(),
            started: Instant::now(),
        }
    }

    /// Classify every id and return the tallies without handing out operations
    pub fn summarize(&self, before: &RecordSet, after: &RecordSet) -> DiffSummary {
        let mut ops = self.diff(before, after);
        ops.by_ref().for_each(drop);
        DiffSummary::new(
            before,
            after,
            ops.counts(),
            self.options.strict_change_detection,
        )
    }
}

/// Diff with default options
pub fn diff<'a>(before: &'a RecordSet, after: &'a RecordSet) -> Diff<'a> {
    CatalogDiffer::default().diff(before, after)
}

enum Phase<'a> {
    /// Walking `before`: each id becomes UPDATE or DELETE
    Existing(indexmap::map::Iter<'a, RecordId, Fields>),
    /// Walking `after`: ids missing from `before` become CREATE
    Created(indexmap::map::Iter<'a, RecordId, Fields>),
    Done,
}

enum Step<'a> {
    Existing(Option<(&'a RecordId, &'a Fields)>),
    Created(Option<(&'a RecordId, &'a Fields)>),
}

/// Lazy operation stream returned by [`CatalogDiffer::diff`]
pub struct Diff<'a> {
    before: &'a RecordSet,
    after: &'a RecordSet,
    options: DiffOptions,
    phase: Phase<'a>,
    counts: OperationCounts,
    started: Instant,
}

impl<'a> Diff<'a> {
    /// Tallies of the operations yielded so far
    pub fn counts(&self) -> OperationCounts {
        self.counts
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    fn classify_existing(
        &mut self,
        id: &'a RecordId,
        before_fields: &'a Fields,
    ) -> Option<Operation<'a>> {
        match self.after.get(id.as_str()) {
            Some(after_fields)
                if self.options.strict_change_detection && before_fields == after_fields =>
            {
                self.counts.unchanged += 1;
                None
            }
            Some(after_fields) => Some(Operation::Update {
                id,
                fields: after_fields,
            }),
            None => Some(Operation::Delete { id }),
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Done;
        log_op_end!(
            OP_DIFF,
            duration_ms = self.started.elapsed().as_millis() as u64,
            creates = self.counts.creates,
            updates = self.counts.updates,
            deletes = self.counts.deletes,
            unchanged = self.counts.unchanged,
        );
    }
}

impl<'a> Iterator for Diff<'a> {
    type Item = Operation<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match &mut self.phase {
                Phase::Existing(iter) => Step::Existing(iter.next()),
                Phase::Created(iter) => Step::Created(iter.next()),
                Phase::Done => return None,
            };

            let op = match step {
                Step::Existing(Some((id, fields))) => self.classify_existing(id, fields),
                Step::Existing(None) => {
                    tracing::debug!(op = OP_DIFF, "before pass complete, scanning for creates");
                    self.phase = Phase::Created(self.after.iter());
                    None
                }
                Step::Created(Some((id, fields))) => {
                    if self.before.contains(id.as_str()) {
                        None
                    } else {
                        Some(Operation::Create { id, fields })
                    }
                }
                Step::Created(None) => {
                    self.finish();
                    return None;
                }
            };

            if let Some(op) = op {
                self.counts.record(op.kind());
                return Some(op);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.phase {
            Phase::Existing(iter) => {
                let lower = if self.options.strict_change_detection {
                    0
                } else {
                    iter.len()
                };
                (lower, Some(iter.len() + self.after.len()))
            }
            Phase::Created(iter) => (0, Some(iter.len())),
            Phase::Done => (0, Some(0)),
        }
    }
}

impl FusedIterator for Diff<'_> {}

impl std::fmt::Debug for Diff<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self.phase {
            Phase::Existing(_) => "existing",
            Phase::Created(_) => "created",
            Phase::Done => "done",
        };
        f.debug_struct("Diff")
            .field("phase", &phase)
            .field("options", &self.options)
            .field("counts", &self.counts)
            .finish()
    }
}
