//! Description of the project a resource list build runs against.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the source set lists draw from unless configured otherwise.
pub const MAIN_SOURCE_SET: &str = "main";

/// Build output directory relative to the project directory.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Resource root of the main source set relative to the project directory.
pub const DEFAULT_MAIN_RESOURCES_DIR: &str = "src/main/resources";

/// Directory below the build output root holding every generated list.
pub const RESOURCELIST_OUTPUT_PATH: &str = "generated/resourcelist";

/// Filesystem layout of a project: where it lives, where builds write, and which source
/// roots belong to which source set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
  /// Project (artifact) name, used by the cartridge presets.
  pub project_name: String,
  /// Absolute project directory; relative paths are resolved against it.
  pub project_dir: PathBuf,
  /// Absolute build output root.
  pub build_dir: PathBuf,
  /// Source roots keyed by source set name.
  pub source_sets: BTreeMap<String, Vec<PathBuf>>,
}

impl ProjectLayout {
  /// Layout with the conventional `build/` output root and no source sets.
  pub fn new(project_name: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
    let project_dir = project_dir.into();
    Self {
      project_name: project_name.into(),
      build_dir: project_dir.join(DEFAULT_BUILD_DIR),
      project_dir,
      source_sets: BTreeMap::new(),
    }
  }

  /// Layout with the conventional `main` source set at `src/main/resources`.
  pub fn conventional(project_name: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
    let mut layout = Self::new(project_name, project_dir);
    let main_root = layout.project_dir.join(DEFAULT_MAIN_RESOURCES_DIR);
    layout.add_source_root(MAIN_SOURCE_SET, main_root);
    layout
  }

  /// Override the build output root.
  pub fn with_build_dir(mut self, build_dir: impl AsRef<Path>) -> Self {
    self.build_dir = self.resolve(build_dir);
    self
  }

  /// Register an additional root for the named source set, creating the set when needed.
  pub fn add_source_root(&mut self, source_set: impl Into<String>, root: impl AsRef<Path>) {
    let root = self.resolve(root);
    let roots = self.source_sets.entry(source_set.into()).or_default();
    if !roots.contains(&root) {
      roots.push(root);
    }
  }

  /// Roots of a source set, or `None` when the set is unknown.
  pub fn source_roots(&self, source_set: &str) -> Option<&[PathBuf]> {
    self.source_sets.get(source_set).map(Vec::as_slice)
  }

  /// Resolve a possibly relative path against the project directory.
  pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.project_dir.join(path)
    }
  }

  /// Common parent of all generated resource lists.
  pub fn resourcelist_output_root(&self) -> PathBuf {
    self.build_dir.join(RESOURCELIST_OUTPUT_PATH)
  }
}
