//! Line-oriented import extraction.
//!
//! Two patterns, tried in order on every trimmed line:
//!
//! 1. `from <module> import <items>`
//! 2. `import <module>` with nothing after the module
//!
//! There is no awareness of comments, string literals, or statements split
//! across lines. A commented-out `# from x import y` does not match (the line
//! starts with `#`), but `from x import y  # note` records `y  # note` as an
//! item, and an import inside a docstring is recorded like a live one.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::{ImportKind, ImportRecord};
use crate::gather::Gathered;
use crate::ports::FileSystem;

fn from_import_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^from\s+(\S+)\s+import\s+(.+)$").expect("valid regex"))
}

fn plain_import_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^import\s+(\S+)$").expect("valid regex"))
}

/// Extracts every import statement from `text`, in line order.
#[must_use]
pub fn extract_imports(text: &str) -> Vec<ImportRecord> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line.trim(), idx + 1))
        .collect()
}

fn parse_line(line: &str, number: usize) -> Option<ImportRecord> {
    if let Some(caps) = from_import_pattern().captures(line) {
        let items = caps[2].split(',').map(|item| item.trim().to_string()).collect();
        return Some(ImportRecord {
            kind: ImportKind::FromImport,
            module: caps[1].to_string(),
            items: Some(items),
            line: number,
            raw_text: line.to_string(),
        });
    }
    plain_import_pattern().captures(line).map(|caps| ImportRecord {
        kind: ImportKind::PlainImport,
        module: caps[1].to_string(),
        items: None,
        line: number,
        raw_text: line.to_string(),
    })
}

/// Reads `path` and extracts its imports.
///
/// A file that cannot be read or decoded contributes no imports and one
/// diagnostic.
pub fn analyze_file(fs: &dyn FileSystem, path: &Path) -> Gathered<Vec<ImportRecord>> {
    match fs.read_to_string(path) {
        Ok(text) => Gathered::ok(extract_imports(&text)),
        Err(e) => {
            Gathered::degraded(Vec::new(), format!("Could not analyze {}: {e}", path.display()))
        }
    }
}
