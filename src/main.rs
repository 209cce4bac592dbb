//! jade-imports: batch-rewrite legacy UI component imports.
//!
//! This tool scans a frontend source tree for `@/components/ui/*` import
//! statements and redirects them to the consolidated `@jade/ui/components`
//! entry point, one renaming sprint at a time. Files are only written when
//! their content actually changes, and per-file failures never abort a run.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands, Sprint};
use colored::Colorize;
use dialoguer::Confirm;
use glob::Pattern;
use jade_imports::rewriter::{self, Diagnostics, FailureKind, FileFailure, FileOutcome, RunReport};
use jade_imports::ruleset::{PatternRule, RuleSet};
use jade_imports::scanner;
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Detect {
            root,
            ext,
            exclude,
            no_default_excludes,
            sprint,
            rules,
            json,
            verbose,
        } => cmd_detect(
            &root,
            &ext,
            &exclude,
            no_default_excludes,
            sprint,
            &rules,
            json,
            verbose,
        ),
        Commands::Apply {
            interactive,
            root,
            ext,
            exclude,
            no_default_excludes,
            sprint,
            rules,
            verbose,
        } => cmd_apply(
            interactive,
            &root,
            &ext,
            &exclude,
            no_default_excludes,
            sprint,
            &rules,
            verbose,
        ),
        Commands::Scan {
            root,
            ext,
            exclude,
            no_default_excludes,
        } => cmd_scan(&root, &ext, &exclude, no_default_excludes),
        Commands::Rules {
            sprint,
            rules,
            json,
        } => cmd_rules(sprint, &rules, json),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_detect(
    root: &Path,
    extensions: &[String],
    exclude: &[String],
    no_default_excludes: bool,
    sprint: Option<Sprint>,
    extra_rules: &[(String, String)],
    json: bool,
    verbose: bool,
) -> Result<()> {
    let ruleset = build_ruleset(sprint, extra_rules)?;
    let excludes = build_excludes(exclude)?;

    if verbose {
        eprintln!(
            "{} Applying {} rules from {} (dry run)",
            "info:".blue().bold(),
            ruleset.len(),
            ruleset.name()
        );
    }

    let report = rewriter::run(
        root,
        extensions,
        &excludes,
        !no_default_excludes,
        &ruleset,
        false,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, root, false);
    if verbose {
        print_diagnostics(&report);
    }
    if !report.changed.is_empty() {
        println!(
            "\n{} Use `apply` to write these changes",
            "hint:".cyan().bold()
        );
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_apply(
    interactive: bool,
    root: &Path,
    extensions: &[String],
    exclude: &[String],
    no_default_excludes: bool,
    sprint: Option<Sprint>,
    extra_rules: &[(String, String)],
    verbose: bool,
) -> Result<()> {
    let ruleset = build_ruleset(sprint, extra_rules)?;
    let excludes = build_excludes(exclude)?;

    if verbose {
        eprintln!(
            "{} Applying {} rules from {}",
            "info:".blue().bold(),
            ruleset.len(),
            ruleset.name()
        );
    }

    let report = if interactive {
        run_interactive(root, extensions, &excludes, !no_default_excludes, &ruleset)?
    } else {
        rewriter::run(
            root,
            extensions,
            &excludes,
            !no_default_excludes,
            &ruleset,
            true,
        )
    };

    print_report(&report, root, true);
    if verbose {
        print_diagnostics(&report);
    }

    Ok(())
}

fn cmd_scan(
    root: &Path,
    extensions: &[String],
    exclude: &[String],
    no_default_excludes: bool,
) -> Result<()> {
    if !root.is_dir() {
        println!("Directory not found: {}", root.display());
        return Ok(());
    }

    let excludes = build_excludes(exclude)?;
    let files = scanner::collect_source_files(root, extensions, &excludes, !no_default_excludes)?;

    println!("Would scan {} files:", files.len());
    for file in files {
        println!("  {}", file.display());
    }

    Ok(())
}

fn cmd_rules(sprint: Option<Sprint>, extra_rules: &[(String, String)], json: bool) -> Result<()> {
    let ruleset = build_ruleset(sprint, extra_rules)?;

    if json {
        let rules: Vec<_> = ruleset
            .rules()
            .iter()
            .map(|rule| {
                serde_json::json!({
                    "pattern": rule.pattern(),
                    "replacement": rule.replacement(),
                })
            })
            .collect();
        let doc = serde_json::json!({ "name": ruleset.name(), "rules": rules });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("{} ({} rules)", ruleset.name().bold(), ruleset.len());
    for rule in ruleset.rules() {
        println!("  {} -> {}", rule.pattern().red(), rule.replacement().green());
    }

    Ok(())
}

/// Assembles the ruleset for a run: the selected sprint's rules, then any
/// `--rule` additions in command-line order.
fn build_ruleset(sprint: Option<Sprint>, extra_rules: &[(String, String)]) -> Result<RuleSet> {
    let mut ruleset = match sprint {
        Some(Sprint::Sprint23) => RuleSet::sprint_2_3()?,
        Some(Sprint::Sprint24) => RuleSet::sprint_2_4()?,
        None => RuleSet::new("custom", Vec::new()),
    };

    for (pattern, replacement) in extra_rules {
        ruleset.push(PatternRule::new(pattern, replacement.as_str())?);
    }

    if ruleset.is_empty() {
        anyhow::bail!("No rules selected; pass --sprint and/or --rule");
    }

    Ok(ruleset)
}

fn build_excludes(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern '{}'", p)))
        .collect()
}

/// Applies the ruleset file by file, asking for confirmation before each
/// write. Skipped files are left out of the changed set entirely.
fn run_interactive(
    root: &Path,
    extensions: &[String],
    excludes: &[Pattern],
    default_excludes: bool,
    ruleset: &RuleSet,
) -> Result<RunReport> {
    if !root.is_dir() {
        return Ok(RunReport {
            missing_root: Some(root.to_path_buf()),
            ..RunReport::default()
        });
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
        match rewriter::rewrite_file(&path, ruleset, false) {
            FileOutcome::Unchanged => {}
            FileOutcome::Failed(failure) => failures.push(failure),
            FileOutcome::Changed => {
                let prompt = format!(
                    "Rewrite {}?",
                    rewriter::report_path(&path, root).display()
                );
                if !Confirm::new().with_prompt(prompt).default(true).interact()? {
                    continue;
                }
                match rewriter::rewrite_file(&path, ruleset, true) {
                    FileOutcome::Changed => changed.push(path),
                    FileOutcome::Failed(failure) => failures.push(failure),
                    FileOutcome::Unchanged => {}
                }
            }
        }
    }

    Ok(RunReport {
        diagnostics: Diagnostics {
            files_scanned,
            files_changed: changed.len(),
            files_failed: failures.len(),
        },
        changed,
        failures,
        missing_root: None,
    })
}

fn print_report(report: &RunReport, root: &Path, applied: bool) {
    if let Some(missing) = &report.missing_root {
        println!("Directory not found: {}", missing.display());
        return;
    }

    for failure in &report.failures {
        eprintln!(
            "{} Error processing {}: {}",
            "warn:".yellow().bold(),
            failure.path.display(),
            failure.message
        );
    }

    let verb = if applied { "Updated" } else { "Would update" };
    println!("{} {} files:", verb.yellow().bold(), report.changed.len());
    for path in &report.changed {
        println!("  - {}", rewriter::report_path(path, root).display());
    }
}

fn print_diagnostics(report: &RunReport) {
    let d = &report.diagnostics;
    eprintln!(
        "{} Scanned {} files: {} changed, {} failed",
        "info:".blue().bold(),
        d.files_scanned,
        d.files_changed,
        d.files_failed
    );
}
