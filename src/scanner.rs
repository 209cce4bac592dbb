//! Source tree scanner.
//!
//! Recursively walks a root directory and yields files whose extension
//! matches the configured set, skipping entries whose names start with `.`
//! and anything matching a user-supplied exclude glob. Traversal is sorted
//! by file name so the same tree always produces the same order.
//!
//! The walk is lazy: paths are produced one at a time rather than collected
//! up front, and traversal errors are yielded as items so a caller can skip
//! a bad entry without abandoning the rest of the tree.

use anyhow::Result;
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lazy iterator over the source files under a root directory.
pub struct SourceWalk {
    inner: walkdir::IntoIter,
    extensions: Vec<String>,
    excludes: Vec<Pattern>,
    default_excludes: bool,
}

/// Starts a walk of `root` yielding files with one of `extensions`.
///
/// `excludes` are glob patterns matched against entry file names; matching
/// directories are pruned without being descended into. With
/// `default_excludes` set, dot-prefixed entries are skipped as well (the
/// root itself is always visited).
pub fn walk(
    root: &Path,
    extensions: &[String],
    excludes: &[Pattern],
    default_excludes: bool,
) -> SourceWalk {
    SourceWalk {
        inner: WalkDir::new(root).sort_by_file_name().into_iter(),
        extensions: extensions.to_vec(),
        excludes: excludes.to_vec(),
        default_excludes,
    }
}

/// Collects the walk into a vector, failing on the first traversal error.
///
/// Used where the full file list is wanted up front (the `scan` command);
/// the rewriter drives `walk` directly to keep per-entry error isolation.
pub fn collect_source_files(
    root: &Path,
    extensions: &[String],
    excludes: &[Pattern],
    default_excludes: bool,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walk(root, extensions, excludes, default_excludes) {
        files.push(entry?);
    }
    Ok(files)
}

impl SourceWalk {
    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let Some(name) = entry.file_name().to_str() else {
            return false;
        };
        if self.default_excludes && name.starts_with('.') {
            return true;
        }
        self.excludes.iter().any(|pattern| pattern.matches(name))
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want == ext))
    }
}

impl Iterator for SourceWalk {
    type Item = walkdir::Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err)),
            };
            if self.is_excluded(&entry) {
                if entry.file_type().is_dir() {
                    self.inner.skip_current_dir();
                }
                continue;
            }
            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    fn exts() -> Vec<String> {
        vec!["ts".to_string(), "tsx".to_string()]
    }

    #[test]
    fn collects_only_matching_extensions() {
        let tmp = TempDir::new().unwrap();
        let a = touch(tmp.path(), "app.ts");
        let b = touch(tmp.path(), "pages/home.tsx");
        touch(tmp.path(), "styles/site.css");
        touch(tmp.path(), "README.md");

        let files = collect_source_files(tmp.path(), &exts(), &[], true).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn recurses_into_nested_directories() {
        let tmp = TempDir::new().unwrap();
        let deep = touch(tmp.path(), "a/b/c/component.tsx");

        let files = collect_source_files(tmp.path(), &exts(), &[], true).unwrap();
        assert_eq!(files, vec![deep]);
    }

    #[test]
    fn yields_paths_in_sorted_order() {
        let tmp = TempDir::new().unwrap();
        let zed = touch(tmp.path(), "zed.ts");
        let ant = touch(tmp.path(), "ant.ts");
        let mid = touch(tmp.path(), "lib/util.ts");

        let files = collect_source_files(tmp.path(), &exts(), &[], true).unwrap();
        assert_eq!(files, vec![ant, mid, zed]);
    }

    #[test]
    fn skips_hidden_entries_by_default() {
        let tmp = TempDir::new().unwrap();
        let visible = touch(tmp.path(), "app.ts");
        touch(tmp.path(), ".next/cache/page.ts");
        touch(tmp.path(), ".hidden.ts");

        let files = collect_source_files(tmp.path(), &exts(), &[], true).unwrap();
        assert_eq!(files, vec![visible]);
    }

    #[test]
    fn keeps_hidden_entries_when_defaults_disabled() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".hidden/page.ts");

        let files = collect_source_files(tmp.path(), &exts(), &[], false).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn underscore_prefixed_files_are_not_hidden() {
        let tmp = TempDir::new().unwrap();
        let app = touch(tmp.path(), "pages/_app.tsx");

        let files = collect_source_files(tmp.path(), &exts(), &[], true).unwrap();
        assert_eq!(files, vec![app]);
    }

    #[test]
    fn exclude_glob_prunes_directories() {
        let tmp = TempDir::new().unwrap();
        let kept = touch(tmp.path(), "src/app.ts");
        touch(tmp.path(), "node_modules/pkg/index.ts");

        let excludes = vec![Pattern::new("node_modules").unwrap()];
        let files = collect_source_files(tmp.path(), &exts(), &excludes, true).unwrap();
        assert_eq!(files, vec![kept]);
    }

    #[test]
    fn exclude_glob_matches_file_names() {
        let tmp = TempDir::new().unwrap();
        let kept = touch(tmp.path(), "app.ts");
        touch(tmp.path(), "app.generated.ts");

        let excludes = vec![Pattern::new("*.generated.ts").unwrap()];
        let files = collect_source_files(tmp.path(), &exts(), &excludes, true).unwrap();
        assert_eq!(files, vec![kept]);
    }

    #[test]
    fn missing_root_yields_an_error_entry() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("does-not-exist");
        let result = collect_source_files(&gone, &exts(), &[], true);
        assert!(result.is_err());
    }
}
