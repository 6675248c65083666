//! Recording adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::session::SharedRecorder;
use crate::ports::{FileMeta, FileSystem, PortError};

/// Records filesystem calls while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

impl PathInput {
    fn new(path: &Path) -> Self {
        Self { path: path.display().to_string() }
    }
}

#[derive(Serialize)]
struct WriteInput {
    path: String,
    bytes: usize,
}

#[derive(Serialize)]
struct WalkInput {
    root: String,
    skip: Vec<String>,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_to_string(path);
        record_result(&self.recorder, "fs", "read_to_string", &PathInput::new(path), &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.write(path, contents);
        let input = WriteInput { path: path.display().to_string(), bytes: contents.len() };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        record_interaction(&self.recorder, "fs", "exists", &PathInput::new(path), &result);
        result
    }

    fn metadata(&self, path: &Path) -> Result<FileMeta, PortError> {
        let result = self.inner.metadata(path);
        record_result(&self.recorder, "fs", "metadata", &PathInput::new(path), &result);
        result
    }

    fn walk_files(&self, root: &Path, skip: &[PathBuf]) -> Result<Vec<PathBuf>, PortError> {
        let result = self.inner.walk_files(root, skip);
        let input = WalkInput {
            root: root.display().to_string(),
            skip: skip.iter().map(|p| p.display().to_string()).collect(),
        };
        // Paths are recorded lossily; serde rejects non-UTF-8 paths.
        let recorded = result.as_ref().map(|files| {
            files.iter().map(|p| p.to_string_lossy().into_owned()).collect::<Vec<_>>()
        });
        record_result(&self.recorder, "fs", "walk_files", &input, &recorded);
        result
    }
}
