//! Named resource list definitions and the container collecting them.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::GenerationUnit;
use crate::project::{MAIN_SOURCE_SET, ProjectLayout};
use crate::selection::PatternSelection;

/// Prefix of the task name derived for every list.
pub const TASK_NAME_PREFIX: &str = "resourceList";

/// Description prefix of the task derived for every list.
pub const TASK_DESCRIPTION: &str = "Creates resource list for ";

/// Group shared by all resource list tasks.
pub const RESOURCELIST_TASK_GROUP: &str = "resource list generation";

/// Configuration of a single resource list artifact.
///
/// Only the name is required up front. Everything else can be set in any order until the
/// definition is turned into a [`GenerationUnit`] by [`ListDefinition::finalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDefinition {
  name: String,
  includes: Vec<String>,
  excludes: Vec<String>,
  source_set_name: Option<String>,
  file_extension: Option<String>,
  resource_list_file_name: Option<String>,
  output_dir: Option<PathBuf>,
}

impl ListDefinition {
  /// Create an unconfigured definition.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  /// Identifier of the definition.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Add an ant-style include pattern.
  pub fn include(&mut self, pattern: impl Into<String>) -> &mut Self {
    self.includes.push(pattern.into());
    self
  }

  /// Add an ant-style exclude pattern.
  pub fn exclude(&mut self, pattern: impl Into<String>) -> &mut Self {
    self.excludes.push(pattern.into());
    self
  }

  /// Replace all include patterns.
  pub fn set_includes<I, S>(&mut self, patterns: I) -> &mut Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.includes = patterns.into_iter().map(Into::into).collect();
    self
  }

  /// Replace all exclude patterns.
  pub fn set_excludes<I, S>(&mut self, patterns: I) -> &mut Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.excludes = patterns.into_iter().map(Into::into).collect();
    self
  }

  /// Select the source set supplying candidate files.
  pub fn set_source_set_name(&mut self, source_set: impl Into<String>) -> &mut Self {
    self.source_set_name = Some(source_set.into());
    self
  }

  /// Extension stripped from matched files, without the leading dot.
  pub fn set_file_extension(&mut self, extension: impl Into<String>) -> &mut Self {
    self.file_extension = Some(extension.into());
    self
  }

  /// Path of the artifact relative to the output directory.
  pub fn set_resource_list_file_name(&mut self, file_name: impl Into<String>) -> &mut Self {
    self.resource_list_file_name = Some(file_name.into());
    self
  }

  /// Directory receiving the artifact. Relative values resolve against the project dir.
  pub fn set_output_dir(&mut self, output_dir: impl Into<PathBuf>) -> &mut Self {
    self.output_dir = Some(output_dir.into());
    self
  }

  /// Include patterns in configuration order.
  pub fn includes(&self) -> &[String] {
    &self.includes
  }

  /// Exclude patterns in configuration order.
  pub fn excludes(&self) -> &[String] {
    &self.excludes
  }

  /// Configured source set, `main` when unset.
  pub fn source_set_name(&self) -> &str {
    self.source_set_name.as_deref().unwrap_or(MAIN_SOURCE_SET)
  }

  /// Configured file extension.
  pub fn file_extension(&self) -> Option<&str> {
    self.file_extension.as_deref()
  }

  /// Configured artifact file name.
  pub fn resource_list_file_name(&self) -> Option<&str> {
    self.resource_list_file_name.as_deref()
  }

  /// Absolute output directory.
  ///
  /// Defaults to `<build>/generated/resourcelist/<name>` with spaces in the name replaced by
  /// underscores.
  pub fn output_dir(&self, layout: &ProjectLayout) -> PathBuf {
    match &self.output_dir {
      Some(dir) => layout.resolve(dir),
      None => layout
        .resourcelist_output_root()
        .join(self.name.replace(' ', "_")),
    }
  }

  /// Name of the generation task, e.g. `resourceListPipelets`.
  pub fn task_name(&self) -> String {
    let mut chars = self.name.chars();
    match chars.next() {
      Some(first) => format!("{TASK_NAME_PREFIX}{}{}", first.to_uppercase(), chars.as_str()),
      None => TASK_NAME_PREFIX.to_string(),
    }
  }

  /// Human readable task description.
  pub fn task_description(&self) -> String {
    format!("{TASK_DESCRIPTION}{}", self.name)
  }

  /// Validate the definition against a project layout and resolve every default.
  ///
  /// No file is touched here, so a failing definition leaves previous artifacts untouched.
  pub fn finalize(&self, layout: &ProjectLayout) -> Result<GenerationUnit> {
    if self.name.trim().is_empty() {
      return Err(Error::configuration(
        &self.name,
        "list name must not be empty",
      ));
    }

    let file_extension = required(&self.name, self.file_extension.as_deref(), "file extension")?;
    let file_extension = file_extension.trim_start_matches('.').to_string();
    if file_extension.is_empty() {
      return Err(Error::configuration(&self.name, "file extension is not set"));
    }

    let resource_list_file_name = required(
      &self.name,
      self.resource_list_file_name.as_deref(),
      "resource list file name",
    )?
    .to_string();

    let source_set = required(&self.name, Some(self.source_set_name()), "source set name")?;
    let source_roots = layout
      .source_roots(source_set)
      .ok_or_else(|| {
        Error::configuration(
          &self.name,
          format!(
            "source set '{source_set}' is not available; a plugin providing source sets must be applied"
          ),
        )
      })?
      .to_vec();

    let selection = PatternSelection::new(&self.name, &self.includes, &self.excludes)?;

    Ok(GenerationUnit {
      name: self.name.clone(),
      task_name: self.task_name(),
      description: self.task_description(),
      group: RESOURCELIST_TASK_GROUP.to_string(),
      source_set: source_set.to_string(),
      source_roots,
      selection,
      file_extension,
      resource_list_file_name,
      output_dir: self.output_dir(layout),
    })
  }
}

fn required<'a>(name: &str, value: Option<&'a str>, what: &str) -> Result<&'a str> {
  match value.map(str::trim) {
    Some(value) if !value.is_empty() => Ok(value),
    _ => Err(Error::configuration(name, format!("{what} is not set"))),
  }
}

/// Insertion-ordered collection of uniquely named list definitions.
#[derive(Debug, Clone, Default)]
pub struct ListContainer {
  lists: Vec<ListDefinition>,
}

impl ListContainer {
  /// Empty container.
  pub fn new() -> Self {
    Self::default()
  }

  /// Create and register an empty definition, returning it for configuration.
  pub fn create(&mut self, name: impl Into<String>) -> Result<&mut ListDefinition> {
    self.register(ListDefinition::new(name))
  }

  /// Register a prepared definition.
  pub fn register(&mut self, definition: ListDefinition) -> Result<&mut ListDefinition> {
    if definition.name().trim().is_empty() {
      return Err(Error::configuration(
        definition.name(),
        "list name must not be empty",
      ));
    }
    if self.get(definition.name()).is_some() {
      return Err(Error::configuration(
        definition.name(),
        "a list with this name is already defined",
      ));
    }

    self.lists.push(definition);
    let index = self.lists.len() - 1;
    Ok(&mut self.lists[index])
  }

  /// Return the named definition, creating an empty one when it does not exist yet.
  pub fn get_or_create(&mut self, name: &str) -> Result<&mut ListDefinition> {
    match self.lists.iter().position(|list| list.name() == name) {
      Some(index) => Ok(&mut self.lists[index]),
      None => self.create(name),
    }
  }

  /// Look up a definition by name.
  pub fn get(&self, name: &str) -> Option<&ListDefinition> {
    self.lists.iter().find(|list| list.name() == name)
  }

  /// Look up a definition by name for further configuration.
  pub fn get_mut(&mut self, name: &str) -> Option<&mut ListDefinition> {
    self.lists.iter_mut().find(|list| list.name() == name)
  }

  /// Definitions in registration order.
  pub fn iter(&self) -> impl Iterator<Item = &ListDefinition> {
    self.lists.iter()
  }

  /// Names in registration order.
  pub fn names(&self) -> Vec<&str> {
    self.lists.iter().map(ListDefinition::name).collect()
  }

  /// Number of registered definitions.
  pub fn len(&self) -> usize {
    self.lists.len()
  }

  /// Returns `true` when no definition is registered.
  pub fn is_empty(&self) -> bool {
    self.lists.is_empty()
  }
}

impl<'a> IntoIterator for &'a ListContainer {
  type Item = &'a ListDefinition;
  type IntoIter = std::slice::Iter<'a, ListDefinition>;

  fn into_iter(self) -> Self::IntoIter {
    self.lists.iter()
  }
}
