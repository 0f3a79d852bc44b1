//! catdiff store - the I/O edges around the diff core
//!
//! Provides:
//! - Loader: delimited text files to [`RecordSet`](catdiff_core::RecordSet)
//! - Sinks: operation streams to JSON lines, tab-separated text, or memory

pub mod errors;
pub mod loader;
pub mod sink;

// Re-export key types
pub use errors::Result;
pub use loader::{load_record_set, parse_delimiter, read_record_set, LoaderOptions};
pub use sink::{
    drain, sink_for, JsonLinesSink, OperationSink, OutputFormat, TextSink, VecSink,
};
