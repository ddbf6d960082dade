//! Support code for the `frz-grid` binary.
//!
//! The grid itself lives in `frz-grid-core` and its terminal front end in
//! `frz-grid-tui`; this crate adds the candidate sources the binary browses,
//! the log file and the platform directories it reads configuration from.

pub mod app_dirs;
pub mod logging;
pub mod sources;
