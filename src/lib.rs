#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod definition;
pub mod error;
pub mod generator;
pub mod models;
pub mod presets;
pub mod project;
pub mod selection;

pub use builder::{ResourceListBuilder, ResourceListReport};
pub use definition::{ListContainer, ListDefinition};
pub use error::{Error, Result};
pub use generator::{ListGenerator, resource_entry_name};
pub use models::{GeneratedList, GenerationOutcome, GenerationResult, GenerationUnit};
pub use project::ProjectLayout;
pub use selection::{DEFAULT_EXCLUDES, FileInclusion, PatternSelection};
