//! Diff command
//!
//! Usage: catdiff diff <BEFORE> <AFTER> [--format jsonl|text] [--output FILE] [--summary]

use crate::config::InputArgs;
use catdiff_core::diff::render_human_summary;
use catdiff_core::{CatalogDiffer, DiffSummary};
use catdiff_core_types::RequestId;
use catdiff_store::errors::io_error;
use catdiff_store::{drain, sink_for, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Operation rendering: jsonl or text
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Write operations to FILE instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also print a Markdown summary on stderr (`--summary=false` turns off a
    /// file setting)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub summary: Option<bool>,
}

/// Execute diff command
pub fn execute(args: DiffArgs, request_id: &RequestId) -> Result<()> {
    let settings = super::prepare(&args.input, args.format.as_deref(), args.summary)?;
    let _span = tracing::info_span!("diff", request_id = %request_id).entered();
    let (before, after) = super::load_pair(&args.input, &settings)?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| io_error("create_output", e).with_path(path.display().to_string()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut sink = sink_for(settings.format, writer);

    let differ = CatalogDiffer::new(settings.diff);
    let mut ops = differ.diff(&before, &after);
    drain(ops.by_ref(), &mut sink)?;

    if settings.summary {
        let summary = DiffSummary::new(
            &before,
            &after,
            ops.counts(),
            settings.diff.strict_change_detection,
        );
        eprint!("{}", render_human_summary(&summary));
    }

    Ok(())
}
