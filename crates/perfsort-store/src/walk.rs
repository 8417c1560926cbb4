//! Recursive discovery of files to grade.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lazily yield every regular file under `root` whose name ends with `suffix`.
///
/// Descends without a depth limit, does not follow symlinks, and visits
/// directory entries in file-name order. A missing `root`, or a `root` that
/// is not a directory, yields nothing.
pub fn source_files(root: &Path, suffix: &str) -> impl Iterator<Item = PathBuf> + use<> {
    if !root.exists() {
        warn!(root = %root.display(), "input directory does not exist, nothing to grade");
    } else if !root.is_dir() {
        warn!(root = %root.display(), "input path is not a directory, nothing to grade");
    }

    let suffix = suffix.to_string();
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.depth() > 0 && entry.file_type().is_file())
        .filter(move |entry| entry.file_name().to_string_lossy().ends_with(suffix.as_str()))
        .map(|entry| entry.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "class C {}").unwrap();
    }

    fn names(paths: &[PathBuf], root: &Path) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn finds_matching_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("a.cs"));
        touch(&root.join("nested/deeper/b.cs"));
        touch(&root.join("nested/readme.md"));
        touch(&root.join("c.csx"));

        let found: Vec<_> = source_files(root, ".cs").collect();
        assert_eq!(names(&found, root), vec!["a.cs", "nested/deeper/b.cs"]);
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("upper.CS"));
        touch(&dir.path().join("lower.cs"));

        let found: Vec<_> = source_files(dir.path(), ".cs").collect();
        assert_eq!(names(&found, dir.path()), vec!["lower.cs"]);
    }

    #[test]
    fn directories_with_suffix_are_not_yielded() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("weird.cs")).unwrap();
        touch(&dir.path().join("weird.cs/inner.cs"));

        let found: Vec<_> = source_files(dir.path(), ".cs").collect();
        assert_eq!(names(&found, dir.path()), vec!["weird.cs/inner.cs"]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let found: Vec<_> = source_files(&dir.path().join("Code"), ".cs").collect();
        assert!(found.is_empty());
    }

    #[test]
    fn file_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Program.cs");
        touch(&file);
        assert_eq!(source_files(&file, ".cs").count(), 0);
    }

    #[test]
    fn empty_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(source_files(dir.path(), ".cs").count(), 0);
    }
}
