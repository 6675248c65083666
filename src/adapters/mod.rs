//! Port implementations.
//!
//! - `live`: the real system clock, disk, and `git` CLI.
//! - `recording`: wraps a live adapter and captures every call to a cassette.
//! - `replaying`: serves calls back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
