//! Resource list orchestrator: turns definitions into generation units, runs them and reports
//! how their output wires into the resources of each source set.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::definition::ListContainer;
use crate::error::{Error, Result};
use crate::generator::ListGenerator;
use crate::models::{GeneratedList, GenerationUnit};
use crate::project::ProjectLayout;

/// Everything a build needs to know after running the resource list generators.
#[derive(Debug, Default)]
pub struct ResourceListReport {
  /// One entry per list, in definition order.
  pub lists: Vec<GeneratedList>,
  /// Output directories to register as additional resource roots, per source set.
  pub resource_dirs: BTreeMap<String, Vec<PathBuf>>,
  /// Tasks the resource processing of each source set has to wait for.
  pub process_resources_depends_on: BTreeMap<String, Vec<String>>,
}

impl ResourceListReport {
  /// Returns `true` when every list was generated.
  pub fn is_success(&self) -> bool {
    self.lists.iter().all(|list| list.outcome.is_ok())
  }

  /// Lists that failed, with their errors.
  pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
    self
      .lists
      .iter()
      .filter_map(|list| list.outcome.as_ref().err().map(|err| (list.name.as_str(), err)))
  }

  fn wire(&mut self, unit: &GenerationUnit) {
    let dirs = self.resource_dirs.entry(unit.source_set.clone()).or_default();
    if !dirs.contains(&unit.output_dir) {
      dirs.push(unit.output_dir.clone());
    }
    self
      .process_resources_depends_on
      .entry(unit.source_set.clone())
      .or_default()
      .push(unit.task_name.clone());
  }
}

/// High-level helper running every resource list of a project.
pub struct ResourceListBuilder<'a> {
  layout: &'a ProjectLayout,
}

impl<'a> ResourceListBuilder<'a> {
  /// Create a builder for the provided project layout.
  pub fn new(layout: &'a ProjectLayout) -> Self {
    Self { layout }
  }

  /// Finalize every definition into a generation unit.
  ///
  /// Each definition is validated on its own. A definition whose artifact would overwrite the
  /// artifact of an earlier definition is rejected.
  pub fn materialize(&self, lists: &ListContainer) -> Vec<(String, Result<GenerationUnit>)> {
    let mut targets = BTreeMap::new();

    lists
      .iter()
      .map(|definition| {
        let unit = definition.finalize(self.layout).and_then(|unit| {
          let target = unit.target_file();
          if let Some(owner) = targets.get(&target) {
            return Err(Error::configuration(
              &unit.name,
              format!(
                "resource list file {} is already generated by '{owner}'",
                target.display()
              ),
            ));
          }
          targets.insert(target, unit.name.clone());
          Ok(unit)
        });
        (definition.name().to_string(), unit)
      })
      .collect()
  }

  /// Generate every list of the container.
  pub fn build(&self, lists: &ListContainer) -> ResourceListReport {
    self.run(lists, |_| true)
  }

  /// Generate only the named lists; every name must exist in the container.
  ///
  /// Unselected lists are still materialized, so their validation and artifact claims apply.
  /// A selected list whose artifact path is already claimed by an earlier, unselected list
  /// fails just as it would in [`ResourceListBuilder::build`].
  pub fn build_only(&self, lists: &ListContainer, names: &[String]) -> Result<ResourceListReport> {
    if let Some(unknown) = names.iter().find(|name| lists.get(name).is_none()) {
      return Err(Error::configuration(
        unknown.as_str(),
        format!(
          "no resource list with this name (known lists: {})",
          lists.names().join(", ")
        ),
      ));
    }

    let selected: BTreeSet<&str> = names.iter().map(String::as_str).collect();
    Ok(self.run(lists, |name| selected.contains(name)))
  }

  fn run<F>(&self, lists: &ListContainer, is_selected: F) -> ResourceListReport
  where
    F: Fn(&str) -> bool,
  {
    let mut report = ResourceListReport::default();

    for (name, unit) in self.materialize(lists) {
      if !is_selected(&name) {
        continue;
      }

      let task_name = lists
        .get(&name)
        .map(|definition| definition.task_name())
        .unwrap_or_default();

      let outcome = unit.and_then(|unit| {
        tracing::debug!(
          list = %unit.name,
          task = %unit.task_name,
          group = %unit.group,
          output = %unit.output_dir.display(),
          "{}",
          unit.description
        );
        report.wire(&unit);
        ListGenerator::new(&unit).run()
      });

      if let Err(err) = &outcome {
        tracing::warn!("{err}");
      }

      report.lists.push(GeneratedList {
        name,
        task_name,
        outcome,
      });
    }

    report
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::GenerationOutcome;
  use crate::presets::{ORM_LIST, PIPELETS_LIST};
  use std::fs;
  use std::path::Path;
  use tempfile::tempdir;

  fn write_file(path: &Path) {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "content").unwrap();
  }

  fn entries(report: &ResourceListReport, name: &str) -> Vec<String> {
    let list = report.lists.iter().find(|list| list.name == name).unwrap();
    match list.outcome.as_ref().unwrap() {
      GenerationOutcome::Written { entries, .. } => entries.clone(),
      GenerationOutcome::Empty { .. } => Vec::new(),
    }
  }

  #[test]
  fn generates_pipelet_list_without_localized_variants() {
    let dir = tempdir().unwrap();
    let layout = ProjectLayout::conventional("app", dir.path());
    let resources = dir.path().join("src/main/resources");
    write_file(&resources.join("pipelet/checkout/Validate.xml"));
    write_file(&resources.join("pipelet/checkout/Validate_de_DE.xml"));

    let lists = ListContainer::with_cartridge_presets("app").unwrap();
    let report = ResourceListBuilder::new(&layout)
      .build_only(&lists, &[PIPELETS_LIST.to_string()])
      .unwrap();

    assert!(report.is_success());
    assert_eq!(report.lists.len(), 1);
    let target = dir
      .path()
      .join("build/generated/resourcelist/pipelets/resources/app/pipeline/pipelets.resource");
    let content = fs::read_to_string(target).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec!["pipelet.checkout.Validate"]);
  }

  #[test]
  fn deduplicates_paths_reachable_from_two_roots() {
    let dir = tempdir().unwrap();
    let mut layout = ProjectLayout::conventional("app", dir.path());
    layout.add_source_root("main", "src/main/extra");
    write_file(&dir.path().join("src/main/resources/model/Product.orm"));
    write_file(&dir.path().join("src/main/extra/model/Product.orm"));
    write_file(&dir.path().join("src/main/extra/model/Basket.orm"));

    let lists = ListContainer::with_cartridge_presets("app").unwrap();
    let report = ResourceListBuilder::new(&layout).build(&lists);

    assert!(report.is_success());
    assert_eq!(entries(&report, ORM_LIST), vec!["model.Basket", "model.Product"]);
    assert_eq!(
      report.lists[0].outcome.as_ref().unwrap(),
      &GenerationOutcome::Empty { stale_removed: false }
    );
  }

  #[test]
  fn wires_output_dirs_into_source_set_resources() {
    let dir = tempdir().unwrap();
    let layout = ProjectLayout::conventional("app", dir.path());
    let lists = ListContainer::with_cartridge_presets("app").unwrap();

    let report = ResourceListBuilder::new(&layout).build(&lists);
    let dirs = &report.resource_dirs["main"];
    assert_eq!(dirs, &vec![
      layout.build_dir.join("generated/resourcelist/pipelets"),
      layout.build_dir.join("generated/resourcelist/orm"),
    ]);
    assert_eq!(report.process_resources_depends_on["main"], vec![
      "resourceListPipelets".to_string(),
      "resourceListOrm".to_string(),
    ]);
  }

  #[test]
  fn failing_list_does_not_stop_others() {
    let dir = tempdir().unwrap();
    let layout = ProjectLayout::conventional("app", dir.path());
    write_file(&dir.path().join("src/main/resources/model/Product.orm"));

    let mut lists = ListContainer::new();
    lists
      .create("broken")
      .unwrap()
      .set_file_extension("orm")
      .set_resource_list_file_name("broken.resource")
      .set_source_set_name("integrationTest");
    lists.add_cartridge_presets("app").unwrap();

    let report = ResourceListBuilder::new(&layout).build(&lists);
    assert!(!report.is_success());

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "broken");
    assert!(failures[0].1.is_configuration());
    assert!(!layout.build_dir.join("generated/resourcelist/broken").exists());
    assert_eq!(entries(&report, ORM_LIST), vec!["model.Product"]);
  }

  #[test]
  fn unknown_source_set_leaves_existing_artifact_untouched() {
    let dir = tempdir().unwrap();
    let layout = ProjectLayout::conventional("app", dir.path());
    let stale = layout.build_dir.join("generated/resourcelist/x/x.resource");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "old\n").unwrap();

    let mut lists = ListContainer::new();
    lists
      .create("x")
      .unwrap()
      .include("**/*.x")
      .set_file_extension("x")
      .set_resource_list_file_name("x.resource")
      .set_source_set_name("nope");

    let report = ResourceListBuilder::new(&layout).build(&lists);
    assert!(!report.is_success());
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].1.is_configuration());
    assert!(report.resource_dirs.is_empty());
    assert_eq!(fs::read(&stale).unwrap(), b"old\n");
  }

  #[test]
  fn rejects_lists_sharing_an_artifact() {
    let dir = tempdir().unwrap();
    let layout = ProjectLayout::conventional("app", dir.path());
    let shared = dir.path().join("build/shared");

    let mut lists = ListContainer::new();
    for name in ["first", "second"] {
      lists
        .create(name)
        .unwrap()
        .set_file_extension("orm")
        .set_resource_list_file_name("same.resource")
        .set_output_dir(&shared);
    }

    let units = ResourceListBuilder::new(&layout).materialize(&lists);
    assert!(units[0].1.is_ok());
    let err = units[1].1.as_ref().unwrap_err();
    assert!(err.to_string().contains("already generated by 'first'"));
  }

  #[test]
  fn independent_lists_survive_each_others_damage() {
    let dir = tempdir().unwrap();
    let layout = ProjectLayout::conventional("app", dir.path());
    let resources = dir.path().join("src/main/resources");
    write_file(&resources.join("pipelet/order/Create.xml"));
    write_file(&resources.join("model/Order.orm"));

    let lists = ListContainer::with_cartridge_presets("app").unwrap();
    let builder = ResourceListBuilder::new(&layout);
    let report = builder.build(&lists);
    let pipelets = report.lists[0].outcome.as_ref().unwrap().path().unwrap().to_path_buf();
    let orm = report.lists[1].outcome.as_ref().unwrap().path().unwrap().to_path_buf();
    let orm_before = fs::read(&orm).unwrap();

    fs::write(&pipelets, "garbage").unwrap();
    let report = builder.build(&lists);
    assert!(report.is_success());
    assert_eq!(fs::read_to_string(&pipelets).unwrap().trim_end(), "pipelet.order.Create");
    assert_eq!(fs::read(&orm).unwrap(), orm_before);

    fs::remove_file(&orm).unwrap();
    builder.build(&lists);
    assert_eq!(fs::read(&orm).unwrap(), orm_before);
  }

  #[test]
  fn build_only_rejects_unknown_names() {
    let dir = tempdir().unwrap();
    let layout = ProjectLayout::conventional("app", dir.path());
    let lists = ListContainer::with_cartridge_presets("app").unwrap();

    let err = ResourceListBuilder::new(&layout)
      .build_only(&lists, &["missing".to_string()])
      .unwrap_err();
    assert!(err.to_string().contains("known lists: pipelets, orm"));
  }

  #[test]
  fn build_only_still_checks_artifact_collisions() {
    let dir = tempdir().unwrap();
    let layout = ProjectLayout::conventional("app", dir.path());
    let shared = dir.path().join("build/shared");

    let mut lists = ListContainer::new();
    for name in ["a", "b"] {
      lists
        .create(name)
        .unwrap()
        .set_file_extension("orm")
        .set_resource_list_file_name("same.resource")
        .set_output_dir(&shared);
    }

    let report = ResourceListBuilder::new(&layout)
      .build_only(&lists, &["b".to_string()])
      .unwrap();
    assert_eq!(report.lists.len(), 1);
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures[0].0, "b");
    assert!(failures[0].1.to_string().contains("already generated by 'a'"));
  }
}
