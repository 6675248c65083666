//! Reading and writing the tracking document through the `FileSystem` port.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::TrackerError;
use crate::gather::Gathered;

use super::TrackingDocument;

/// Persistence for one tracking file.
///
/// All I/O goes through `ctx.fs` so that the store works with live,
/// recording, and replaying adapters.
pub struct TrackingStore<'a> {
    ctx: &'a ServiceContext,
    path: PathBuf,
}

impl<'a> TrackingStore<'a> {
    /// Creates a store for the document at `path`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, path: &Path) -> Self {
        Self { ctx, path: path.to_path_buf() }
    }

    /// Path of the tracking file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the existing document, or a fresh one.
    ///
    /// A missing or blank file gives a fresh document silently. An
    /// unreadable or unparseable file gives a fresh document and a
    /// diagnostic; its contents are first copied to a
    /// `<file>.corrupt-<timestamp>` backup so the old history is not lost.
    pub fn load(&self) -> Gathered<TrackingDocument> {
        if !self.ctx.fs.exists(&self.path) {
            return Gathered::ok(TrackingDocument::default());
        }

        let contents = match self.ctx.fs.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                return Gathered::degraded(
                    TrackingDocument::default(),
                    format!("Could not load existing tracking file {}: {e}", self.path.display()),
                )
            }
        };
        if contents.trim().is_empty() {
            return Gathered::ok(TrackingDocument::default());
        }

        match serde_yaml::from_str::<Option<TrackingDocument>>(&contents) {
            Ok(doc) => Gathered::ok(doc.unwrap_or_default()),
            Err(e) => {
                let mut fresh = Gathered::degraded(
                    TrackingDocument::default(),
                    format!(
                        "Could not parse existing tracking file {}, starting fresh: {e}",
                        self.path.display()
                    ),
                );
                let backup = self.backup_path();
                match self.ctx.fs.write(&backup, &contents) {
                    Ok(()) => {
                        fresh.warn(format!("Previous contents saved to {}", backup.display()));
                    }
                    Err(e) => fresh.warn(format!(
                        "Could not back up unparseable tracking file to {}: {e}",
                        backup.display()
                    )),
                }
                fresh
            }
        }
    }

    /// Serializes `doc` and overwrites the tracking file.
    ///
    /// The write is not atomic: a crash part-way through can leave a
    /// truncated file, which the next [`load`](Self::load) treats as corrupt.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, doc: &TrackingDocument) -> Result<(), TrackerError> {
        let yaml = serde_yaml::to_string(doc)?;
        self.ctx
            .fs
            .write(&self.path, &yaml)
            .map_err(|e| TrackerError::Write { path: self.path.clone(), message: e.to_string() })
    }

    fn backup_path(&self) -> PathBuf {
        let stamp = self.ctx.clock.now().format("%Y%m%dT%H%M%SZ");
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".corrupt-{stamp}"));
        self.path.with_file_name(name)
    }
}
