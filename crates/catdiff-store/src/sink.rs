//! Operation sinks
//!
//! A sink receives operations one at a time as the diff is pulled, so the
//! full stream never has to be held in memory.

use crate::errors::{io_error, serialization, Result};
use catdiff_core::errors::{ExError, ExErrorKind};
use catdiff_core::{log_op_end, log_op_error, log_op_start};
use catdiff_core::{Operation, OperationCounts, OwnedOperation};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use std::time::Instant;

const OP_DRAIN: &str = "drain_operations";

/// Consumer of an operation stream
pub trait OperationSink {
    /// Handle one operation
    ///
    /// # Errors
    ///
    /// Implementation specific; writers report `Io` or `Serialization`.
    fn emit(&mut self, op: &Operation<'_>) -> Result<()>;

    /// Called once after the last operation
    ///
    /// # Errors
    ///
    /// Implementation specific; writers report flush failures as `Io`.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: OperationSink + ?Sized> OperationSink for &mut S {
    fn emit(&mut self, op: &Operation<'_>) -> Result<()> {
        (**self).emit(op)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: OperationSink + ?Sized> OperationSink for Box<S> {
    fn emit(&mut self, op: &Operation<'_>) -> Result<()> {
        (**self).emit(op)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// One JSON object per line: `{"op":"CREATE","id":"3","payload":{...}}`
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OperationSink for JsonLinesSink<W> {
    fn emit(&mut self, op: &Operation<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, op)
            .map_err(|e| serialization("jsonl_emit", e).with_record_id(op.id().as_str()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| io_error("jsonl_emit", e))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| io_error("jsonl_finish", e))
    }
}

/// Tab separated: `KIND<TAB>id<TAB>payload-json`, payload `null` for DELETE
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OperationSink for TextSink<W> {
    fn emit(&mut self, op: &Operation<'_>) -> Result<()> {
        let payload = serde_json::to_string(&op.payload())
            .map_err(|e| serialization("text_emit", e).with_record_id(op.id().as_str()))?;
        writeln!(self.writer, "{}\t{}\t{}", op.kind(), op.id(), payload)
            .map_err(|e| io_error("text_emit", e))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| io_error("text_finish", e))
    }
}

/// Keeps owned copies of every operation it receives
#[derive(Debug, Default)]
pub struct VecSink {
    operations: Vec<OwnedOperation>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[OwnedOperation] {
        &self.operations
    }

    pub fn into_inner(self) -> Vec<OwnedOperation> {
        self.operations
    }
}

impl OperationSink for VecSink {
    fn emit(&mut self, op: &Operation<'_>) -> Result<()> {
        self.operations.push(op.to_owned_operation());
        Ok(())
    }
}

/// Rendering used by the writer sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Text,
}

impl FromStr for OutputFormat {
    type Err = ExError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "jsonl" | "json" => Ok(OutputFormat::Jsonl),
            "text" | "tsv" => Ok(OutputFormat::Text),
            other => Err(ExError::new(ExErrorKind::InvalidConfig)
                .with_op("parse_output_format")
                .with_message(format!(
                    "unknown output format '{}', expected 'jsonl' or 'text'",
                    other
                ))),
        }
    }
}

/// Writer sink for `format`
pub fn sink_for<'w, W: Write + 'w>(format: OutputFormat, writer: W) -> Box<dyn OperationSink + 'w> {
    match format {
        OutputFormat::Jsonl => Box::new(JsonLinesSink::new(writer)),
        OutputFormat::Text => Box::new(TextSink::new(writer)),
    }
}

/// Pull every operation into `sink`, then finish it
///
/// Returns the tally of what was emitted. Stops at the first sink error;
/// operations already emitted stay emitted.
///
/// # Errors
///
/// Whatever the sink reports from `emit` or `finish`.
pub fn drain<'a, I, S>(ops: I, sink: &mut S) -> Result<OperationCounts>
where
    I: IntoIterator<Item = Operation<'a>>,
    S: OperationSink + ?Sized,
{
    let start = Instant::now();
    log_op_start!(OP_DRAIN);

    let mut counts = OperationCounts::default();
    let result = ops
        .into_iter()
        .try_for_each(|op| {
            sink.emit(&op)?;
            counts.record(op.kind());
            Ok::<(), ExError>(())
        })
        .and_then(|()| sink.finish());

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(()) => {
            log_op_end!(
                OP_DRAIN,
                duration_ms = duration_ms,
                creates = counts.creates,
                updates = counts.updates,
                deletes = counts.deletes,
            );
            Ok(counts)
        }
        Err(e) => {
            log_op_error!(OP_DRAIN, e.clone(), duration_ms = duration_ms);
            Err(e)
        }
    }
}
