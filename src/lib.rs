//! jade-imports library for batch-rewriting legacy UI component imports.
//!
//! This library provides programmatic access to the import-migration
//! functionality. The core workflow involves three phases:
//!
//! 1. **Scanning**: Lazily enumerate source files by extension under a root
//! 2. **Rewriting**: Apply an ordered ruleset to each file, writing back only
//!    on change
//! 3. **Reporting**: Collect changed paths and isolated per-file failures
//!
//! # Example
//!
//! ```no_run
//! use jade_imports::{rewriter, ruleset::RuleSet};
//! use std::path::Path;
//!
//! let rules = RuleSet::sprint_2_3().unwrap();
//! let extensions = vec!["ts".to_string(), "tsx".to_string()];
//! let excludes: Vec<glob::Pattern> = Vec::new();
//!
//! // Dry run: report what would change without touching the tree.
//! let report = rewriter::run(
//!     Path::new("apps/curated/marketplace-frontend/src"),
//!     &extensions,
//!     &excludes,
//!     true,
//!     &rules,
//!     false,
//! );
//!
//! println!("{} files would change", report.changed.len());
//! ```

pub mod rewriter;
pub mod ruleset;
pub mod scanner;

// Re-export commonly used types at crate root
pub use rewriter::{Diagnostics, FileFailure, FileOutcome, RunReport};
pub use ruleset::{PatternRule, RuleSet};
