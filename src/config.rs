//! Run configuration.
//!
//! Most settings come from the command line (see [`crate::cli`]). A few
//! developer knobs come from the environment, optionally seeded from a
//! `.env` file in the working directory.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COMMON_TRACKER_RECORD` | unset | Record port interactions into cassettes under this dir |
//! | `RUST_LOG` | `info` | Log filter for stderr output |

use std::env;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::revision::DEFAULT_SINCE_REF;
use crate::scan::DEFAULT_EXTENSION;

/// Environment variable that turns on cassette recording.
pub const RECORD_ENV: &str = "COMMON_TRACKER_RECORD";

/// Settings for one tracker run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Common directory to track, relative to the project root.
    pub common_dir: PathBuf,
    /// Tracking document to update, relative to the project root.
    pub tracking_file: PathBuf,
    /// Revision that changed files are diffed against.
    pub since_ref: String,
    /// Source file extensions to scan, without the leading dot.
    pub extensions: Vec<String>,
}

impl TrackerConfig {
    /// A config with default `since_ref` and extensions.
    pub fn new(common_dir: impl Into<PathBuf>, tracking_file: impl Into<PathBuf>) -> Self {
        Self {
            common_dir: common_dir.into(),
            tracking_file: tracking_file.into(),
            since_ref: DEFAULT_SINCE_REF.to_string(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
        }
    }

    /// Builds the config from parsed arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let mut extensions: Vec<String> = Vec::new();
        for ext in &cli.extensions {
            let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
            if !ext.is_empty() && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        if extensions.is_empty() {
            extensions.push(DEFAULT_EXTENSION.to_string());
        }

        Self {
            common_dir: cli.common_dir.clone(),
            tracking_file: cli.tracking_file.clone(),
            since_ref: cli.since.clone(),
            extensions,
        }
    }
}

/// Cassette directory requested through [`RECORD_ENV`], if any.
#[must_use]
pub fn record_dir_from_env() -> Option<PathBuf> {
    env::var_os(RECORD_ENV).filter(|v| !v.is_empty()).map(PathBuf::from)
}
