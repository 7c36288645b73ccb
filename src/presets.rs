//! Built-in resource lists of a cartridge: pipelets and ORM models.

use crate::definition::{ListContainer, ListDefinition};
use crate::error::Result;
use crate::project::MAIN_SOURCE_SET;

/// Name of the pipelet resource list.
pub const PIPELETS_LIST: &str = "pipelets";
const PIPELETS_INCLUDE: &str = "**/pipelet/**/*.xml";
/// Localized pipelet descriptors such as `Foo_de_DE.xml`.
const PIPELETS_EXCLUDE: &str = "**/*_??_??.xml";
const PIPELETS_EXTENSION: &str = "xml";

/// Name of the ORM resource list.
pub const ORM_LIST: &str = "orm";
const ORM_INCLUDE: &str = "**/**/*.orm";
const ORM_EXTENSION: &str = "orm";

/// Definitions of the pipelet and ORM lists for the artifact `project_name`.
pub fn cartridge_definitions(project_name: &str) -> Vec<ListDefinition> {
  let mut pipelets = ListDefinition::new(PIPELETS_LIST);
  pipelets
    .include(PIPELETS_INCLUDE)
    .exclude(PIPELETS_EXCLUDE)
    .set_source_set_name(MAIN_SOURCE_SET)
    .set_file_extension(PIPELETS_EXTENSION)
    .set_resource_list_file_name(format!(
      "resources/{project_name}/pipeline/pipelets.resource"
    ));

  let mut orm = ListDefinition::new(ORM_LIST);
  orm
    .include(ORM_INCLUDE)
    .set_source_set_name(MAIN_SOURCE_SET)
    .set_file_extension(ORM_EXTENSION)
    .set_resource_list_file_name(format!("resources/{project_name}/orm/orm.resource"));

  vec![pipelets, orm]
}

impl ListContainer {
  /// Container pre-populated with the cartridge lists.
  pub fn with_cartridge_presets(project_name: &str) -> Result<Self> {
    let mut container = Self::new();
    container.add_cartridge_presets(project_name)?;
    Ok(container)
  }

  /// Register the cartridge lists; fails when a list of the same name already exists.
  pub fn add_cartridge_presets(&mut self, project_name: &str) -> Result<()> {
    for definition in cartridge_definitions(project_name) {
      self.register(definition)?;
    }
    Ok(())
  }
}
