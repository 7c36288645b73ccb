//! Project configuration loader describing source sets and resource lists.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::definition::{ListContainer, ListDefinition};
use crate::project::{
    DEFAULT_BUILD_DIR, DEFAULT_MAIN_RESOURCES_DIR, MAIN_SOURCE_SET, ProjectLayout,
};

/// File name searched for in the project directory.
pub const DEFAULT_CONFIG_FILE: &str = "resourcelist.config.json";

/// Discoverable project configuration describing layout and resource lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Artifact name; the project directory name when unset.
    pub project_name: Option<String>,
    /// Build output root relative to the project directory.
    pub build_dir: String,
    /// Source roots per source set, relative to the project directory.
    pub source_sets: BTreeMap<String, Vec<String>>,
    /// Register the built-in pipelet and ORM lists.
    pub cartridge: bool,
    /// Resource lists in definition order.
    pub lists: Vec<ListConfig>,
}

/// One resource list as written in the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Unique list name.
    pub name: String,
    /// Ant-style include patterns.
    pub include: Vec<String>,
    /// Ant-style exclude patterns.
    pub exclude: Vec<String>,
    /// Source set supplying files; `main` when unset.
    pub source_set: Option<String>,
    /// Extension stripped from entries.
    pub file_extension: Option<String>,
    /// Artifact path below the output directory.
    pub resource_list_file_name: Option<String>,
    /// Output directory; derived from the build dir when unset.
    pub output_dir: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: None,
            build_dir: DEFAULT_BUILD_DIR.into(),
            source_sets: BTreeMap::from([(
                MAIN_SOURCE_SET.to_string(),
                vec![DEFAULT_MAIN_RESOURCES_DIR.to_string()],
            )]),
            cartridge: false,
            lists: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Load the configuration file from the project directory.
    ///
    /// A missing file yields the default configuration, an unreadable or malformed one is an
    /// error.
    pub fn discover(project_dir: &Path) -> Result<Self> {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        if !candidate.exists() {
            tracing::debug!("no {} in {}, using defaults", DEFAULT_CONFIG_FILE, project_dir.display());
            return Ok(Self::default());
        }
        Self::from_path(&candidate)
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Build the project layout rooted at `project_dir`.
    pub fn to_layout(&self, project_dir: &Path) -> ProjectLayout {
        let project_name = self.project_name.clone().unwrap_or_else(|| {
            project_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let mut layout =
            ProjectLayout::new(project_name, project_dir).with_build_dir(&self.build_dir);
        for (source_set, roots) in &self.source_sets {
            layout.source_sets.entry(source_set.clone()).or_default();
            for root in roots {
                layout.add_source_root(source_set.as_str(), root);
            }
        }
        layout
    }

    /// Build the list container, including the cartridge lists when enabled.
    pub fn to_lists(&self, layout: &ProjectLayout) -> Result<ListContainer> {
        let mut container = ListContainer::new();
        if self.cartridge {
            container.add_cartridge_presets(&layout.project_name)?;
        }
        for list in &self.lists {
            container
                .register(list.to_definition())
                .with_context(|| format!("invalid list entry '{}'", list.name))?;
        }
        Ok(container)
    }
}

impl ListConfig {
    /// Convert the file record into a list definition.
    pub fn to_definition(&self) -> ListDefinition {
        let mut definition = ListDefinition::new(&self.name);
        definition
            .set_includes(self.include.iter().cloned())
            .set_excludes(self.exclude.iter().cloned());
        if let Some(source_set) = &self.source_set {
            definition.set_source_set_name(source_set.as_str());
        }
        if let Some(extension) = &self.file_extension {
            definition.set_file_extension(extension.as_str());
        }
        if let Some(file_name) = &self.resource_list_file_name {
            definition.set_resource_list_file_name(file_name.as_str());
        }
        if let Some(output_dir) = &self.output_dir {
            definition.set_output_dir(PathBuf::from(output_dir));
        }
        definition
    }
}
