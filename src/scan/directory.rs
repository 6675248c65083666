//! Inventory of the common directory.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::SecondsFormat;
use tracing::debug;

use super::imports::analyze_file;
use super::{is_source_file, relative_key, FileEntry};
use crate::context::ServiceContext;
use crate::gather::Gathered;

/// Describes every source file under `root/target_dir`, keyed by its path
/// relative to the target directory.
///
/// A missing or unreadable target directory yields an empty mapping and a
/// diagnostic; a file that cannot be statted is left out with a diagnostic.
pub fn scan_directory(
    ctx: &ServiceContext,
    root: &Path,
    target_dir: &Path,
    extensions: &[String],
) -> Gathered<BTreeMap<String, FileEntry>> {
    let dir = root.join(target_dir);
    if !ctx.fs.exists(&dir) {
        return Gathered::degraded(
            BTreeMap::new(),
            format!("Common directory {} does not exist", target_dir.display()),
        );
    }

    let files = match ctx.fs.walk_files(&dir, &[]) {
        Ok(files) => files,
        Err(e) => {
            return Gathered::degraded(
                BTreeMap::new(),
                format!("Could not scan common directory {}: {e}", target_dir.display()),
            )
        }
    };

    let mut result = Gathered::ok(BTreeMap::new());
    for path in files.iter().filter(|p| is_source_file(p, extensions)) {
        let meta = match ctx.fs.metadata(path) {
            Ok(meta) => meta,
            Err(e) => {
                result.warn(format!("Could not stat {}: {e}", path.display()));
                continue;
            }
        };
        let imports = analyze_file(ctx.fs.as_ref(), path).drain_into(&mut result.diagnostics);
        debug!(path = %path.display(), imports = imports.len(), "scanned common file");

        let entry = FileEntry {
            absolute_path: path.display().to_string(),
            size_bytes: meta.size_bytes,
            imports,
            last_modified: meta.modified.to_rfc3339_opts(SecondsFormat::Micros, true),
        };
        result.value.insert(relative_key(path, &dir), entry);
    }
    result
}
