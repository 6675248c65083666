//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `common-tracker`.
#[derive(Debug, Parser)]
#[command(
    name = "common-tracker",
    version,
    about = "Track common code usage and imports",
    long_about = "Scans a shared directory, finds every file that imports from it, and appends \
                  a snapshot to a YAML tracking file. Run from the root of a git repository."
)]
pub struct Cli {
    /// Directory containing common code to track.
    #[arg(long = "common_dir", visible_alias = "common-dir", value_name = "DIR")]
    pub common_dir: PathBuf,

    /// YAML file to store tracking information.
    #[arg(long = "tracking_file", visible_alias = "tracking-file", value_name = "FILE")]
    pub tracking_file: PathBuf,

    /// Revision to diff the common directory against.
    #[arg(long, value_name = "REF", default_value = "HEAD~1")]
    pub since: String,

    /// Source file extension to scan (repeatable).
    #[arg(long = "ext", value_name = "EXT", default_value = "py")]
    pub extensions: Vec<String>,
}
