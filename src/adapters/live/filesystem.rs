//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::warn;
use walkdir::WalkDir;

use crate::ports::filesystem::{FileMeta, FileSystem};
use crate::ports::PortError;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn metadata(&self, path: &Path) -> Result<FileMeta, PortError> {
        let meta = std::fs::metadata(path)?;
        let modified: DateTime<Utc> = meta.modified()?.into();
        Ok(FileMeta { size_bytes: meta.len(), modified })
    }

    fn walk_files(&self, root: &Path, skip: &[PathBuf]) -> Result<Vec<PathBuf>, PortError> {
        // Surface an unreadable root as an error instead of an empty walk.
        std::fs::read_dir(root)?;

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !skip.iter().any(|s| entry.path() == s.as_path()));
        for entry in walker {
            match entry {
                // Links are not followed, but a link to a file still counts.
                Ok(entry) if is_file_or_file_link(&entry) => files.push(entry.into_path()),
                Ok(_) => {}
                Err(err) => warn!("skipping unreadable entry under {}: {err}", root.display()),
            }
        }
        files.sort();
        Ok(files)
    }
}

fn is_file_or_file_link(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
