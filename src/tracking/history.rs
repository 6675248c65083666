//! Fixed-size window over tracking entries.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize, Serializer};

use super::TrackingEntry;

/// Maximum number of entries a tracking document keeps.
pub const HISTORY_LIMIT: usize = 50;

/// Oldest-to-newest tracking entries, never more than [`HISTORY_LIMIT`].
///
/// Pushing into a full window evicts the oldest entry. Deserializing a
/// longer list keeps only its newest entries, so the bound holds for
/// hand-edited documents too.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<TrackingEntry>")]
pub struct History {
    entries: VecDeque<TrackingEntry>,
}

impl History {
    /// An empty history.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: VecDeque::with_capacity(HISTORY_LIMIT) }
    }

    /// Appends `entry`, returning the entry evicted to make room, if any.
    pub fn push(&mut self, entry: TrackingEntry) -> Option<TrackingEntry> {
        let evicted =
            if self.entries.len() >= HISTORY_LIMIT { self.entries.pop_front() } else { None };
        self.entries.push_back(entry);
        evicted
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently pushed entry.
    #[must_use]
    pub fn latest(&self) -> Option<&TrackingEntry> {
        self.entries.back()
    }

    /// The oldest retained entry.
    #[must_use]
    pub fn oldest(&self) -> Option<&TrackingEntry> {
        self.entries.front()
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TrackingEntry> {
        self.entries.iter()
    }
}

impl From<Vec<TrackingEntry>> for History {
    fn from(entries: Vec<TrackingEntry>) -> Self {
        let skip = entries.len().saturating_sub(HISTORY_LIMIT);
        Self { entries: entries.into_iter().skip(skip).collect() }
    }
}

impl Serialize for History {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}
