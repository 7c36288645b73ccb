//! Write the resource list artifact of a finalized list definition.

use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::generator::entries::{LINE_ENDING, resource_entry_name};
use crate::generator::scanning::{CandidateFiles, scan_source_roots};
use crate::models::{GenerationOutcome, GenerationResult, GenerationUnit};

/// Generates the artifact of a single [`GenerationUnit`].
///
/// Every run rewrites the artifact from scratch: a previous file is deleted first, and no
/// file is created at all when nothing matches.
#[derive(Debug, Clone, Copy)]
pub struct ListGenerator<'a> {
  unit: &'a GenerationUnit,
}

impl<'a> ListGenerator<'a> {
  /// Create a generator for the provided unit.
  pub fn new(unit: &'a GenerationUnit) -> Self {
    Self { unit }
  }

  /// Scan the unit's source roots and generate the artifact from the selected files.
  pub fn run(&self) -> Result<GenerationOutcome> {
    let candidates = scan_source_roots(&self.unit.source_roots, &self.unit.selection);
    self.generate(&candidates)
  }

  /// Generate the artifact from files that already passed include/exclude filtering.
  ///
  /// Entries are written in lexicographic order of the entry name, ties broken by source
  /// path, so an unchanged source tree yields a byte-identical file.
  pub fn generate(&self, candidates: &CandidateFiles) -> Result<GenerationOutcome> {
    let unit = self.unit;
    let target = unit.target_file();

    let stale_removed = remove_stale_artifact(&target)
      .map_err(|err| Error::file_operation(&unit.name, err))?;

    let result = collect_source_paths(candidates);
    if result.is_empty() {
      tracing::info!("Collection of files is empty for {}", unit.name);
      return Ok(GenerationOutcome::Empty { stale_removed });
    }

    let mut ordered: Vec<(String, &str)> = result
      .source_paths
      .iter()
      .map(|path| (resource_entry_name(path, &unit.file_extension), path.as_str()))
      .collect();
    ordered.sort();
    let entries: Vec<String> = ordered.into_iter().map(|(entry, _)| entry).collect();

    write_entries(&target, &entries).map_err(|err| Error::file_operation(&unit.name, err))?;
    tracing::info!(
      list = %unit.name,
      entries = entries.len(),
      "wrote resource list {}",
      target.display()
    );

    Ok(GenerationOutcome::Written {
      path: target,
      entries,
    })
  }
}

/// Gather the unique relative paths of all non-directory candidates.
///
/// Candidates may be given relative to their root or as absolute paths below it. Absolute
/// paths outside their root are ignored.
pub fn collect_source_paths(candidates: &CandidateFiles) -> GenerationResult {
  let mut result = GenerationResult::default();

  for (root, files) in candidates {
    for file in files {
      let absolute = root.join(file);
      if absolute.is_dir() {
        continue;
      }

      let Ok(relative) = absolute.strip_prefix(root) else {
        tracing::debug!(
          "ignoring {} which is not below {}",
          file.display(),
          root.display()
        );
        continue;
      };

      let relative = relative.to_string_lossy().replace('\\', "/");
      if !relative.is_empty() {
        result.source_paths.insert(relative);
      }
    }
  }

  result
}

fn remove_stale_artifact(target: &Path) -> io::Result<bool> {
  match fs::remove_file(target) {
    Ok(()) => Ok(true),
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
    Err(err) => Err(err),
  }
}

fn write_entries(target: &Path, entries: &[String]) -> io::Result<()> {
  if let Some(parent) = target.parent() {
    fs::create_dir_all(parent)?;
  }

  let mut out = BufWriter::new(File::create(target)?);
  for entry in entries {
    tracing::debug!("'{}' will be added to list.", entry);
    out.write_all(entry.as_bytes())?;
    out.write_all(LINE_ENDING.as_bytes())?;
  }
  out.flush()?;
  out.get_ref().sync_all()
}
