//! Clock port for timestamping tracking entries.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Entry timestamps, `last_updated`, and backup file names all come from
/// here, so a replayed clock makes a whole update reproducible.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
