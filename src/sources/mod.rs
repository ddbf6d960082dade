//! Candidate sources for the binary: a browsable directory or a fixed list.

pub mod directory;
pub mod list;
pub mod matcher;

pub use directory::{DirectoryListing, ListingOptions, PARENT_ENTRY, SELF_ENTRY, resolve_directory};
pub use list::FilteredList;
