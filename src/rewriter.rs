//! Batch rewrite engine.
//!
//! Drives the scanner over a source tree and applies a `RuleSet` to each
//! file: read leniently, substitute in sequence, write back only when the
//! content actually changed. Failures on individual files are captured as
//! values and never abort the batch.
//!
//! Matching is purely lexical. A pattern that happens to occur inside a
//! string literal or comment is rewritten like any other occurrence; callers
//! accept that as part of the tool's contract.

use crate::ruleset::RuleSet;
use crate::scanner;
use glob::Pattern;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Which stage of per-file processing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Read,
    Write,
    Walk,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Read => "read",
            FailureKind::Write => "write",
            FailureKind::Walk => "walk",
        };
        f.write_str(label)
    }
}

/// A per-file failure, reported instead of propagated so the rest of the
/// batch keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of processing a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Content differed after substitution (and was written in write mode).
    Changed,
    /// No rule matched; the file was left untouched.
    Unchanged,
    /// Reading or writing failed; the file is excluded from the changed set.
    Failed(FileFailure),
}

/// Summary statistics from a run.
#[derive(Debug, Default, Serialize)]
pub struct Diagnostics {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub files_failed: usize,
}

/// Complete results of a batch run.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Changed paths in traversal order; each file appears at most once.
    pub changed: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    pub diagnostics: Diagnostics,
    /// Set when the root directory did not exist and nothing was scanned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_root: Option<PathBuf>,
}

impl RunReport {
    fn for_missing_root(root: &Path) -> Self {
        Self {
            missing_root: Some(root.to_path_buf()),
            ..Self::default()
        }
    }
}

/// Applies `rules` to a single file.
///
/// The file is read as raw bytes and decoded leniently: byte sequences that
/// are not valid UTF-8 become replacement characters rather than errors.
/// The rewritten content is compared to the decoded original and written
/// back only when it differs and `write` is set; with `write` off the
/// outcome still reports whether the file would change.
pub fn rewrite_file(path: &Path, rules: &RuleSet, write: bool) -> FileOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            return FileOutcome::Failed(FileFailure {
                path: path.to_path_buf(),
                kind: FailureKind::Read,
                message: err.to_string(),
            });
        }
    };
    let original = String::from_utf8_lossy(&bytes);
    let rewritten = rules.apply(&original);

    if rewritten == original.as_ref() {
        return FileOutcome::Unchanged;
    }

    if write {
        if let Err(err) = fs::write(path, &rewritten) {
            return FileOutcome::Failed(FileFailure {
                path: path.to_path_buf(),
                kind: FailureKind::Write,
                message: err.to_string(),
            });
        }
    }

    FileOutcome::Changed
}

/// Runs `rules` over every matching file under `root`.
///
/// A missing root is a reported, non-fatal condition: the returned report
/// carries `missing_root` and empty results. Traversal and per-file errors
/// are collected as failures; no error escapes this function.
pub fn run(
    root: &Path,
    extensions: &[String],
    excludes: &[Pattern],
    default_excludes: bool,
    rules: &RuleSet,
    write: bool,
) -> RunReport {
    if !root.is_dir() {
        return RunReport::for_missing_root(root);
    }

    let mut changed = Vec::new();
    let mut failures = Vec::new();
    let mut files_scanned = 0;

    for entry in scanner::walk(root, extensions, excludes, default_excludes) {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                failures.push(FileFailure {
                    path: err.path().map(Path::to_path_buf).unwrap_or_default(),
                    kind: FailureKind::Walk,
                    message: err.to_string(),
                });
                continue;
            }
        };

        files_scanned += 1;
        match rewrite_file(&path, rules, write) {
            FileOutcome::Changed => changed.push(path),
            FileOutcome::Unchanged => {}
            FileOutcome::Failed(failure) => failures.push(failure),
        }
    }

    RunReport {
        diagnostics: Diagnostics {
            files_scanned,
            files_changed: changed.len(),
            files_failed: failures.len(),
        },
        changed,
        failures,
        missing_root: None,
    }
}

/// Renders `path` relative to the ancestor three levels above `root`, the
/// form used for the changed-file listing. Paths outside that ancestor are
/// shown in full.
pub fn report_path<'a>(path: &'a Path, root: &Path) -> &'a Path {
    match root.ancestors().nth(3) {
        Some(base) => path.strip_prefix(base).unwrap_or(path),
        None => path,
    }
}
