//! Subcommand implementations

pub mod diff;
pub mod summary;

use crate::config::{FileConfig, InputArgs, Settings};
use catdiff_core::logging_facility;
use catdiff_core::RecordSet;
use catdiff_store::{load_record_set, Result};

/// Resolve settings and start logging
///
/// Logging starts only after settings are known since the log format can
/// come from the settings file.
pub(crate) fn prepare(
    args: &InputArgs,
    format: Option<&str>,
    summary: Option<bool>,
) -> Result<Settings> {
    let config_path = FileConfig::locate(args.config.as_deref());
    let file = match &config_path {
        Some(path) => FileConfig::read(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(args, format, summary, file)?;

    logging_facility::init(settings.log_format.profile());
    if let Some(path) = &config_path {
        tracing::debug!(op = "load_config", path = %path.display(), "settings file loaded");
    }
    tracing::debug!(settings = ?settings, "settings resolved");
    Ok(settings)
}

/// Load the before and after snapshots with the same loader options
pub(crate) fn load_pair(args: &InputArgs, settings: &Settings) -> Result<(RecordSet, RecordSet)> {
    let before = load_record_set(&args.before, &settings.loader)?;
    let after = load_record_set(&args.after, &settings.loader)?;
    Ok((before, after))
}
