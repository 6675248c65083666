//! Recording adapter for the `GitRepo` port.

use std::path::Path;

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{GitRepo, PortError, RevisionInfo};

/// Records git queries while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: SharedRecorder,
}

impl RecordingGitRepo {
    /// Creates a new recording git repo wrapping the given implementation.
    pub fn new(inner: Box<dyn GitRepo>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct DiffInput<'a> {
    dir: String,
    since: &'a str,
}

impl GitRepo for RecordingGitRepo {
    fn current_revision_info(&self) -> Result<RevisionInfo, PortError> {
        let result = self.inner.current_revision_info();
        record_result(&self.recorder, "git", "current_revision_info", &(), &result);
        result
    }

    fn changed_paths(&self, dir: &Path, since: &str) -> Result<Vec<String>, PortError> {
        let result = self.inner.changed_paths(dir, since);
        let input = DiffInput { dir: dir.display().to_string(), since };
        record_result(&self.recorder, "git", "changed_paths", &input, &result);
        result
    }
}
