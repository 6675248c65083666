//! Import scanning: what the common directory contains and who imports it.
//!
//! - [`imports`] pulls import statements out of source text.
//! - [`directory`] describes every source file inside the common directory.
//! - [`usage`] finds files outside the common directory that import from it.

pub mod directory;
pub mod imports;
pub mod usage;

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// Source file extension scanned when none is configured.
pub const DEFAULT_EXTENSION: &str = "py";

/// Which of the two recognised statement shapes produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportKind {
    /// `from <module> import <items>`
    #[serde(rename = "from_import")]
    FromImport,
    /// `import <module>`
    #[serde(rename = "import")]
    PlainImport,
}

/// One import statement found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// Statement shape.
    #[serde(rename = "type")]
    pub kind: ImportKind,
    /// Module path exactly as written.
    pub module: String,
    /// Imported names; only present for `from` imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    /// 1-based line number.
    pub line: usize,
    /// The trimmed source line.
    #[serde(rename = "raw_line")]
    pub raw_text: String,
}

/// A source file inside the common directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path of the file as walked, rooted at the project root.
    #[serde(rename = "full_path")]
    pub absolute_path: String,
    /// File length in bytes.
    pub size_bytes: u64,
    /// Imports found in the file.
    pub imports: Vec<ImportRecord>,
    /// Modification time, ISO-8601.
    pub last_modified: String,
}

/// A file outside the common directory that imports from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    /// The imports that reference the common directory.
    #[serde(rename = "common_imports")]
    pub matched_imports: Vec<ImportRecord>,
    /// Always `matched_imports.len()`.
    #[serde(rename = "import_count")]
    pub match_count: usize,
}

impl UsageEntry {
    /// Builds an entry, deriving the count from the matches.
    #[must_use]
    pub fn new(matched_imports: Vec<ImportRecord>) -> Self {
        let match_count = matched_imports.len();
        Self { matched_imports, match_count }
    }
}

/// Returns `true` if `path` has one of the given extensions (case-insensitive).
pub(crate) fn is_source_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// `path` relative to `base`, joined with `/` on every platform.
pub(crate) fn relative_key(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_import_serializes_without_items() {
        let record = ImportRecord {
            kind: ImportKind::PlainImport,
            module: "os".into(),
            items: None,
            line: 2,
            raw_text: "import os".into(),
        };
        let yaml = serde_yaml::to_string(&record).unwrap();
        assert_eq!(yaml, "type: import\nmodule: os\nline: 2\nraw_line: import os\n");
    }

    #[test]
    fn usage_entry_count_matches_imports() {
        let record = ImportRecord {
            kind: ImportKind::FromImport,
            module: "common.util".into(),
            items: Some(vec!["helper".into()]),
            line: 1,
            raw_text: "from common.util import helper".into(),
        };
        let entry = UsageEntry::new(vec![record.clone(), record]);
        assert_eq!(entry.match_count, 2);
    }

    #[test]
    fn source_file_filter_is_case_insensitive() {
        let exts = vec!["py".to_string()];
        assert!(is_source_file(Path::new("a/b.py"), &exts));
        assert!(is_source_file(Path::new("a/B.PY"), &exts));
        assert!(!is_source_file(Path::new("a/b.pyc"), &exts));
        assert!(!is_source_file(Path::new("a/py"), &exts));
    }

    #[test]
    fn relative_key_uses_forward_slashes() {
        let key = relative_key(Path::new("root/common/sub/util.py"), Path::new("root/common"));
        assert_eq!(key, "sub/util.py");
    }
}
