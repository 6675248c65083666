//! Port traits defining external boundaries.
//!
//! The tracker touches three external systems: the wall clock, the
//! filesystem, and the git working tree. Each is reached only through the
//! traits here; implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod git;

pub use clock::Clock;
pub use filesystem::{FileMeta, FileSystem};
pub use git::{GitRepo, RevisionInfo};

/// Error type returned by every fallible port method.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
