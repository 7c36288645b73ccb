//! Resource list generation broken into focused submodules for easier testing.

mod entries;
mod generation;
mod scanning;

pub use entries::{LINE_ENDING, resource_entry_name};
pub use generation::{ListGenerator, collect_source_paths};
pub use scanning::{CandidateFiles, list_files, scan_source_roots};
