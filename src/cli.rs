//! Command-line interface definitions.
//!
//! Defines the argument parser and subcommands using clap's derive API.
//! Each subcommand corresponds to a distinct operation: previewing which
//! files a ruleset would change, applying the rewrite, listing scan targets,
//! or printing the active rules.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Batch-rewrite legacy `@/components/ui` imports to the consolidated
/// `@jade/ui` entry point.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// Built-in renaming sprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sprint {
    /// Badge, alert, label, textarea, and select.
    #[value(name = "2.3")]
    Sprint23,
    /// Progress, switch, scroll-area, tabs, dropdown-menu, and dialog.
    #[value(name = "2.4")]
    Sprint24,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report files whose imports would be rewritten, without modifying them.
    Detect {
        /// Root directory to scan.
        #[arg(long, default_value = "apps/curated/marketplace-frontend/src")]
        root: PathBuf,

        /// File extensions to visit.
        #[arg(long, value_delimiter = ',', default_value = "ts,tsx")]
        ext: Vec<String>,

        /// Glob patterns for directories/files to exclude (e.g., "node_modules", "*.generated.ts").
        /// By default, entries starting with `.` are excluded.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable default exclusion of `.` prefixed entries.
        #[arg(long)]
        no_default_excludes: bool,

        /// Built-in ruleset to apply.
        #[arg(long, value_enum)]
        sprint: Option<Sprint>,

        /// Extra rules in `pattern=replacement` format, applied after the sprint rules.
        #[arg(long = "rule", value_parser = parse_rule)]
        rules: Vec<(String, String)>,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,

        /// Print additional diagnostics to stderr.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Rewrite matching imports in place.
    Apply {
        /// Interactively confirm each file's changes before writing it.
        #[arg(short, long)]
        interactive: bool,

        /// Root directory to scan.
        #[arg(long, default_value = "apps/curated/marketplace-frontend/src")]
        root: PathBuf,

        /// File extensions to visit.
        #[arg(long, value_delimiter = ',', default_value = "ts,tsx")]
        ext: Vec<String>,

        /// Glob patterns for directories/files to exclude (e.g., "node_modules", "*.generated.ts").
        /// By default, entries starting with `.` are excluded.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable default exclusion of `.` prefixed entries.
        #[arg(long)]
        no_default_excludes: bool,

        /// Built-in ruleset to apply.
        #[arg(long, value_enum)]
        sprint: Option<Sprint>,

        /// Extra rules in `pattern=replacement` format, applied after the sprint rules.
        #[arg(long = "rule", value_parser = parse_rule)]
        rules: Vec<(String, String)>,

        /// Print additional diagnostics to stderr.
        #[arg(short, long)]
        verbose: bool,
    },

    /// List files that would be scanned without processing them.
    Scan {
        /// Root directory to scan.
        #[arg(long, default_value = "apps/curated/marketplace-frontend/src")]
        root: PathBuf,

        /// File extensions to visit.
        #[arg(long, value_delimiter = ',', default_value = "ts,tsx")]
        ext: Vec<String>,

        /// Glob patterns for directories/files to exclude (e.g., "node_modules", "*.generated.ts").
        /// By default, entries starting with `.` are excluded.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable default exclusion of `.` prefixed entries.
        #[arg(long)]
        no_default_excludes: bool,
    },

    /// Print the rules a run would apply.
    Rules {
        /// Built-in ruleset to show.
        #[arg(long, value_enum)]
        sprint: Option<Sprint>,

        /// Extra rules in `pattern=replacement` format, applied after the sprint rules.
        #[arg(long = "rule", value_parser = parse_rule)]
        rules: Vec<(String, String)>,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },
}

fn parse_rule(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid rule format '{}', expected 'pattern=replacement'",
            s
        ));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}
