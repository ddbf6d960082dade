//! Configuration loading and resolution.
//!
//! `load` layers the config files, environment and CLI flags, then validates
//! the result into a [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::{ActionConfig, CandidateInput, ResolvedConfig};
