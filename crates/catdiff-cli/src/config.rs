//! Run settings
//!
//! Values come from command-line flags, then `catdiff.toml`, then built-in
//! defaults, in that order of precedence.

use catdiff_core::errors::{ExError, ExErrorKind};
use catdiff_core::logging_facility::Profile;
use catdiff_core::{DiffOptions, DuplicatePolicy};
use catdiff_store::{parse_delimiter, LoaderOptions, OutputFormat, Result};
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "catdiff.toml";

const OP_CONFIG: &str = "load_config";

/// Flags shared by every subcommand that reads two snapshots
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Snapshot before the change
    pub before: PathBuf,

    /// Snapshot after the change
    pub after: PathBuf,

    /// Column holding the record id (default: first column)
    #[arg(long, value_name = "COLUMN")]
    pub id_column: Option<String>,

    /// Field delimiter, a single character or `tab`
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Skip UPDATE for records whose fields did not change (`--strict=false`
    /// turns off a file setting)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub strict: Option<bool>,

    /// What to do with repeated ids: reject or last-wins
    #[arg(long, value_name = "POLICY")]
    pub on_duplicate: Option<String>,

    /// Settings file (default: ./catdiff.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log rendering on stderr: pretty or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,
}

/// Contents of a settings file; every key is optional
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub diff: DiffSection,
    pub loader: LoaderSection,
    pub output: OutputSection,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DiffSection {
    pub strict_change_detection: Option<bool>,
    pub on_duplicate: Option<DuplicatePolicy>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderSection {
    pub id_column: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub format: Option<OutputFormat>,
    pub summary: Option<bool>,
    pub log_format: Option<LogFormat>,
}

/// Log rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn profile(self) -> Profile {
        match self {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ExError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(invalid_config(format!(
                "unknown log format '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

impl FileConfig {
    /// The settings file to read: `explicit`, or `catdiff.toml` in the
    /// working directory if it exists
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.is_file().then_some(default)
            }
        }
    }

    /// Read and parse a settings file
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the file cannot be read or is not valid settings TOML.
    pub fn read(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| invalid_config(e.to_string()).with_path(shown.clone()))?;
        Self::parse(&text).map_err(|e| e.with_path(shown))
    }

    /// Parse settings TOML
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on syntax errors, unknown keys, or bad values.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| invalid_config(e.to_string()))
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub loader: LoaderOptions,
    pub diff: DiffOptions,
    pub format: OutputFormat,
    pub summary: bool,
    pub log_format: LogFormat,
}

impl Settings {
    /// Merge flags over the file over defaults
    ///
    /// `format` and `summary` are the diff command's output flags; other
    /// commands pass `None`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for an unparsable delimiter, duplicate policy or log
    /// format, whichever source it came from.
    pub fn resolve(
        args: &InputArgs,
        format: Option<&str>,
        summary: Option<bool>,
        file: FileConfig,
    ) -> Result<Self> {
        let delimiter = match args.delimiter.as_deref().or(file.loader.delimiter.as_deref()) {
            Some(value) => parse_delimiter(value)?,
            None => LoaderOptions::default().delimiter,
        };

        let duplicate_policy = match args.on_duplicate.as_deref() {
            Some(value) => value
                .parse::<DuplicatePolicy>()
                .map_err(invalid_config)?,
            None => file.diff.on_duplicate.unwrap_or_default(),
        };

        let format = match format {
            Some(value) => value.parse::<OutputFormat>()?,
            None => file.output.format.unwrap_or_default(),
        };

        let log_format = match args.log_format.as_deref() {
            Some(value) => value.parse::<LogFormat>()?,
            None => file.output.log_format.unwrap_or_default(),
        };

        Ok(Self {
            loader: LoaderOptions {
                id_column: args.id_column.clone().or(file.loader.id_column),
                delimiter,
                duplicate_policy,
            },
            diff: DiffOptions {
                strict_change_detection: args
                    .strict
                    .or(file.diff.strict_change_detection)
                    .unwrap_or(false),
            },
            format,
            summary: summary.or(file.output.summary).unwrap_or(false),
            log_format,
        })
    }
}

fn invalid_config(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op(OP_CONFIG)
        .with_message(message)
}
