//! Data structures produced while preparing and generating resource lists.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::selection::PatternSelection;

/// A finalized list definition with every default resolved, ready for generation.
#[derive(Debug, Clone)]
pub struct GenerationUnit {
  /// Name of the originating list definition.
  pub name: String,
  /// Derived task name, e.g. `resourceListOrm`.
  pub task_name: String,
  /// Human readable task description.
  pub description: String,
  /// Task group shared by every resource list.
  pub group: String,
  /// Source set the candidate files come from.
  pub source_set: String,
  /// Absolute source roots of that source set.
  pub source_roots: Vec<PathBuf>,
  /// Compiled include/exclude patterns.
  pub selection: PatternSelection,
  /// Extension stripped from entries, without leading dot.
  pub file_extension: String,
  /// Artifact path relative to `output_dir`.
  pub resource_list_file_name: String,
  /// Absolute directory registered as an additional resource root.
  pub output_dir: PathBuf,
}

impl GenerationUnit {
  /// Absolute path of the generated artifact.
  pub fn target_file(&self) -> PathBuf {
    self.output_dir.join(&self.resource_list_file_name)
  }
}

/// Relative source paths discovered for one generation run.
///
/// Paths use `/` separators and collapse duplicates reachable through several roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
  /// Unique relative source paths.
  pub source_paths: BTreeSet<String>,
}

impl GenerationResult {
  /// Returns `true` when no source file was selected.
  pub fn is_empty(&self) -> bool {
    self.source_paths.is_empty()
  }

  /// Number of unique source paths.
  pub fn len(&self) -> usize {
    self.source_paths.len()
  }
}

/// What a successful generation left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
  /// The artifact was rewritten with the given entries, in file order.
  Written {
    /// Absolute path of the artifact.
    path: PathBuf,
    /// Entries written, one per line.
    entries: Vec<String>,
  },
  /// No source file matched, so no artifact exists.
  Empty {
    /// Whether a stale artifact from an earlier run was removed.
    stale_removed: bool,
  },
}

impl GenerationOutcome {
  /// Path of the written artifact, if any.
  pub fn path(&self) -> Option<&Path> {
    match self {
      Self::Written { path, .. } => Some(path),
      Self::Empty { .. } => None,
    }
  }

  /// Number of entries written.
  pub fn entry_count(&self) -> usize {
    match self {
      Self::Written { entries, .. } => entries.len(),
      Self::Empty { .. } => 0,
    }
  }
}

/// Result of one list within an orchestrated build.
#[derive(Debug)]
pub struct GeneratedList {
  /// Name of the list definition.
  pub name: String,
  /// Task name derived from the definition.
  pub task_name: String,
  /// Outcome of generation, or the failure that stopped it.
  pub outcome: crate::error::Result<GenerationOutcome>,
}
