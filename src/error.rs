//! Errors that end a tracker run.
//!
//! Everything that goes wrong while gathering data is absorbed as a
//! diagnostic; only the conditions below reach the caller and turn into a
//! non-zero exit.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal tracker errors.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The working directory is not the root of a git working tree.
    #[error("This tool must be run from the root of a git repository (no .git in {0})")]
    NotRepositoryRoot(PathBuf),

    /// The tracking document could not be rendered as YAML.
    #[error("Could not serialize tracking document: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The tracking document could not be written.
    #[error("Error writing tracking file {path}: {message}")]
    Write {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying failure.
        message: String,
    },

    /// A recording session could not be started or finished.
    #[error("Recording failed: {0}")]
    Recording(String),
}
