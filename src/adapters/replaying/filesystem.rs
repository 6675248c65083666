//! Replaying adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::{FileMeta, FileSystem};
use crate::ports::PortError;

/// Replays recorded filesystem operations from a cassette.
///
/// Writes are not performed; the recorded outcome is returned instead.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        let output = next_output(&self.replayer, "fs", "read_to_string");
        replay_result(&output, "fs::read_to_string")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        let output = next_output(&self.replayer, "fs", "write");
        if let Some(err) = output.get("err") {
            return Err(err.as_str().unwrap_or("unknown error").to_string().into());
        }
        Ok(())
    }

    fn exists(&self, _path: &Path) -> bool {
        next_output(&self.replayer, "fs", "exists")
            .as_bool()
            .expect("fs::exists: expected boolean output")
    }

    fn metadata(&self, _path: &Path) -> Result<FileMeta, PortError> {
        let output = next_output(&self.replayer, "fs", "metadata");
        replay_result(&output, "fs::metadata")
    }

    fn walk_files(&self, _root: &Path, _skip: &[PathBuf]) -> Result<Vec<PathBuf>, PortError> {
        let output = next_output(&self.replayer, "fs", "walk_files");
        replay_result(&output, "fs::walk_files")
    }
}
