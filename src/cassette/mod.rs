//! Cassettes: YAML recordings of port interactions.
//!
//! A recording session wraps the live adapters and captures every call; a
//! replaying context serves those calls back so a tracker run can be
//! reproduced without git, the disk, or the wall clock.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
