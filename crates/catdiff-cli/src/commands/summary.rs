//! Summary command
//!
//! Usage: catdiff summary <BEFORE> <AFTER> [--json]

use crate::config::InputArgs;
use catdiff_core::diff::render_human_summary;
use catdiff_core::CatalogDiffer;
use catdiff_core_types::RequestId;
use catdiff_store::errors::serialization;
use catdiff_store::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the summary as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,
}

/// Execute summary command
pub fn execute(args: SummaryArgs, request_id: &RequestId) -> Result<()> {
    let settings = super::prepare(&args.input, None, None)?;
    let _span = tracing::info_span!("summary", request_id = %request_id).entered();
    let (before, after) = super::load_pair(&args.input, &settings)?;

    let summary = CatalogDiffer::new(settings.diff).summarize(&before, &after);

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| serialization("render_summary", e))?;
        println!("{}", json);
    } else {
        print!("{}", render_human_summary(&summary));
    }

    Ok(())
}
