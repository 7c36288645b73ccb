//! Directory scanning utilities for harvesting the candidate files of a list.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::selection::FileInclusion;

/// Selected files keyed by the source root they were found under.
pub type CandidateFiles = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Walk `root` and return the `/`-separated relative paths of all selected regular files.
///
/// A root that does not exist contributes nothing. Entries are visited in file name order
/// so the result is stable between runs.
pub fn list_files<S: FileInclusion>(root: &Path, selection: &S) -> Vec<PathBuf> {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "source root does not exist, skipping");
        return Vec::new();
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skipping unreadable entry below {}: {}", root.display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(root).ok()?.to_path_buf();
            let relative_str = relative.to_string_lossy().replace('\\', "/");
            selection
                .is_included(&relative_str)
                .then_some(relative)
        })
        .collect()
}

/// Scan every source root, keeping the root each selected file belongs to.
pub fn scan_source_roots<S: FileInclusion>(roots: &[PathBuf], selection: &S) -> CandidateFiles {
    roots
        .iter()
        .map(|root| (root.clone(), list_files(root, selection)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::PatternSelection;
    use std::fs;
    use tempfile::tempdir;

    fn write_file(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "<pipelet/>").unwrap();
    }

    #[test]
    fn lists_selected_files_relative_to_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("pipelet/checkout/Validate.xml"));
        write_file(&root.join("pipelet/checkout/Validate_de_DE.xml"));
        write_file(&root.join("pipelet/checkout/Notes.txt"));
        fs::create_dir_all(root.join("pipelet/empty.xml")).unwrap();

        let selection = PatternSelection::new(
            "pipelets",
            &["**/pipelet/**/*.xml".to_string()],
            &["**/*_??_??.xml".to_string()],
        )
        .unwrap();

        let files = list_files(root, &selection);
        assert_eq!(files, vec![PathBuf::from("pipelet/checkout/Validate.xml")]);
    }

    #[test]
    fn skips_scm_metadata_and_editor_backups() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("pipelet/Validate.xml"));
        write_file(&root.join(".svn/pristine/pipelet/Validate.xml"));
        write_file(&root.join("pipelet/.git/Validate.xml"));
        write_file(&root.join("pipelet/Validate.xml~"));

        let selection =
            PatternSelection::new("pipelets", &["**/pipelet/**/*".to_string()], &[]).unwrap();

        let files = list_files(root, &selection);
        assert_eq!(files, vec![PathBuf::from("pipelet/Validate.xml")]);
    }

    #[test]
    fn missing_root_yields_no_files() {
        let dir = tempdir().unwrap();
        let files = list_files(&dir.path().join("absent"), &PatternSelection::all());
        assert!(files.is_empty());
    }

    #[test]
    fn scans_each_root_separately() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        write_file(&first.join("orm/A.orm"));
        write_file(&second.join("orm/A.orm"));
        write_file(&second.join("orm/B.orm"));

        let candidates = scan_source_roots(&[first.clone(), second.clone()], &PatternSelection::all());
        assert_eq!(candidates[&first], vec![PathBuf::from("orm/A.orm")]);
        assert_eq!(candidates[&second], vec![
            PathBuf::from("orm/A.orm"),
            PathBuf::from("orm/B.orm")
        ]);
    }
}
