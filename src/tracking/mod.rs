//! The tracking document: a rolling history of scan results.
//!
//! Layout on disk (YAML, keys in this order):
//!
//! ```text
//! tracking_history:        # oldest -> newest, at most 50
//!   - timestamp
//!     commit_info: {hash, author, date}
//!     analysis:    {common_directory, changed_files_in_common, ...}
//! last_updated
//! common_directory
//! summary: {total_tracking_entries, current_common_files,
//!           current_usage_count, most_recent_changes}
//! ```

pub mod history;
pub mod store;
pub mod update;

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub use history::{History, HISTORY_LIMIT};

use crate::scan::{FileEntry, UsageEntry};

/// How many changed files the summary lists.
pub const RECENT_CHANGES_LIMIT: usize = 10;

/// Placeholder used when git cannot describe `HEAD`.
pub const UNKNOWN: &str = "unknown";

/// Renders a timestamp the way every date in the document is written.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// The commit a tracking entry was taken at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash.
    pub hash: String,
    /// Author name.
    pub author: String,
    /// Commit date.
    pub date: String,
}

impl CommitInfo {
    /// All three fields set to `"unknown"`.
    #[must_use]
    pub fn unknown() -> Self {
        Self { hash: UNKNOWN.into(), author: UNKNOWN.into(), date: UNKNOWN.into() }
    }
}

/// Scan results for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Directory that was scanned, as given on the command line.
    pub common_directory: String,
    /// Files under the directory changed since the reference revision.
    #[serde(rename = "changed_files_in_common")]
    pub changed_files: Vec<String>,
    /// Number of source files in the directory.
    pub total_common_files: usize,
    /// Per-file detail, keyed by path relative to the directory.
    pub common_files_detail: BTreeMap<String, FileEntry>,
    /// Consumers, keyed by path relative to the project root.
    pub usage_across_codebase: BTreeMap<String, UsageEntry>,
    /// Number of consuming files.
    pub total_files_using_common: usize,
}

impl Analysis {
    /// Builds an analysis, deriving the two totals from the mappings.
    #[must_use]
    pub fn new(
        common_directory: String,
        changed_files: Vec<String>,
        common_files_detail: BTreeMap<String, FileEntry>,
        usage_across_codebase: BTreeMap<String, UsageEntry>,
    ) -> Self {
        Self {
            common_directory,
            changed_files,
            total_common_files: common_files_detail.len(),
            common_files_detail,
            total_files_using_common: usage_across_codebase.len(),
            usage_across_codebase,
        }
    }
}

/// One timestamped snapshot, appended once per run and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEntry {
    /// When the entry was built.
    pub timestamp: String,
    /// Commit the scan ran against.
    pub commit_info: CommitInfo,
    /// What the scan found.
    pub analysis: Analysis,
}

/// Headline numbers from the newest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Entries currently retained.
    pub total_tracking_entries: usize,
    /// Source files in the common directory at the newest entry.
    pub current_common_files: usize,
    /// Consuming files at the newest entry.
    pub current_usage_count: usize,
    /// Up to ten changed files from the newest entry.
    pub most_recent_changes: Vec<String>,
}

impl Summary {
    fn describe(latest: &TrackingEntry, total_tracking_entries: usize) -> Self {
        let analysis = &latest.analysis;
        Self {
            total_tracking_entries,
            current_common_files: analysis.total_common_files,
            current_usage_count: analysis.total_files_using_common,
            most_recent_changes: analysis
                .changed_files
                .iter()
                .take(RECENT_CHANGES_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

/// The persisted document.
///
/// Missing keys default to empty so that partially written or older
/// documents still load. Top-level keys this tool does not own are kept in
/// [`extra`](Self::extra) and written back after the known ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingDocument {
    /// Retained entries, oldest first.
    pub tracking_history: History,
    /// When the document was last written.
    pub last_updated: String,
    /// Directory tracked by the newest entry.
    pub common_directory: String,
    /// Numbers from the newest entry.
    pub summary: Summary,
    /// Unrecognised top-level keys, preserved as loaded.
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl TrackingDocument {
    /// Appends `entry` and refreshes `last_updated`, `common_directory`, and
    /// `summary` from it. Returns the entry evicted from a full history.
    pub fn record(
        &mut self,
        entry: TrackingEntry,
        updated_at: DateTime<Utc>,
    ) -> Option<TrackingEntry> {
        self.common_directory.clone_from(&entry.analysis.common_directory);
        let evicted = self.tracking_history.push(entry);
        self.last_updated = format_timestamp(updated_at);
        if let Some(latest) = self.tracking_history.latest() {
            self.summary = Summary::describe(latest, self.tracking_history.len());
        }
        evicted
    }
}

/// A minimal entry for tests, identified by its commit hash.
#[cfg(test)]
pub(crate) fn test_entry(hash: &str) -> TrackingEntry {
    TrackingEntry {
        timestamp: "2024-05-01T12:00:00.000000Z".into(),
        commit_info: CommitInfo { hash: hash.into(), author: "a".into(), date: "d".into() },
        analysis: Analysis::new("common".into(), Vec::new(), BTreeMap::new(), BTreeMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_summarises_newest_entry_only() {
        let mut doc = TrackingDocument::default();
        let mut first = test_entry("old");
        first.analysis.changed_files = vec!["common/old.py".into()];
        first.analysis.total_common_files = 9;
        doc.record(first, Utc::now());

        let changes: Vec<String> = (0..15).map(|i| format!("common/f{i}.py")).collect();
        let mut second = test_entry("new");
        second.analysis.changed_files = changes.clone();
        second.analysis.common_directory = "shared".into();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        doc.record(second, at);

        assert_eq!(doc.summary.total_tracking_entries, 2);
        assert_eq!(doc.summary.current_common_files, 0);
        assert_eq!(doc.summary.most_recent_changes, changes[..10].to_vec());
        assert_eq!(doc.common_directory, "shared");
        assert_eq!(doc.last_updated, "2024-06-01T08:30:00.000000Z");
    }

    #[test]
    fn serialized_keys_follow_declaration_order() {
        let mut doc = TrackingDocument::default();
        doc.record(test_entry("abc"), Utc::now());

        let yaml = serde_yaml::to_string(&doc).unwrap();
        let positions: Vec<usize> =
            ["tracking_history:", "last_updated:", "common_directory:", "summary:"]
                .iter()
                .map(|key| yaml.find(&format!("\n{key}")).map_or(0, |p| p + 1))
                .collect();
        assert_eq!(positions[0], 0, "tracking_history must come first");
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "unexpected key order:\n{yaml}");

        let entry_keys = ["timestamp:", "commit_info:", "analysis:", "changed_files_in_common:"];
        let offsets: Vec<usize> = entry_keys.iter().map(|k| yaml.find(k).unwrap()).collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn partial_document_loads_with_defaults() {
        let doc: TrackingDocument = serde_yaml::from_str("common_directory: sth/common\n").unwrap();
        assert!(doc.tracking_history.is_empty());
        assert_eq!(doc.common_directory, "sth/common");
        assert_eq!(doc.summary, Summary::default());
        assert!(doc.extra.is_empty());
    }

    #[test]
    fn unknown_top_level_keys_survive_a_rewrite() {
        let yaml = "common_directory: sth/common\nowner: platform-team\nnotes:\n  - keep me\n";
        let mut doc: TrackingDocument = serde_yaml::from_str(yaml).unwrap();
        doc.record(test_entry("abc"), Utc::now());

        let written = serde_yaml::to_string(&doc).unwrap();
        let reloaded: TrackingDocument = serde_yaml::from_str(&written).unwrap();

        assert_eq!(reloaded.extra.get("owner").and_then(|v| v.as_str()), Some("platform-team"));
        assert!(written.contains("- keep me"));
        assert!(!reloaded.extra.contains_key("summary"));
        assert_eq!(reloaded.tracking_history.len(), 1);
    }
}
