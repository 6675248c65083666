//! Filesystem port for walking, statting, reading, and writing files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PortError;

/// Size and modification time of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// File length in bytes.
    pub size_bytes: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// Provides filesystem access for the scanners and the tracking store.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns size and modification time for a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be statted.
    fn metadata(&self, path: &Path) -> Result<FileMeta, PortError>;

    /// Recursively lists every regular file under `root`, sorted by path.
    ///
    /// Directories whose path equals one of `skip` are pruned without being
    /// descended into. Entries that cannot be read part-way through the walk
    /// are skipped; only a failure to enumerate `root` itself is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be enumerated.
    fn walk_files(&self, root: &Path, skip: &[PathBuf]) -> Result<Vec<PathBuf>, PortError>;
}
