//! dirdedupe - Directory-Priority Duplicate File Remover
//!
//! Finds duplicate files across a set of directory trees by content
//! hashing (streamed SHA-256), lets the caller rank the directories that
//! hold duplicates, and deletes every copy except the one in the
//! most-preferred directory.
//!
//! The library core is presentation-free: the scanner and the deleter run
//! on background workers, report progress as free-text messages, and hand
//! their results back over channels. The bundled CLI binary is one such
//! consumer.

pub mod actions;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod progress;
pub mod scanner;
pub mod session;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use actions::DeleteReport;
use cli::{Cli, Commands, DedupeArgs, OutputFormat, ScanArgs};
use duplicates::{plan, DeletionPlan, PriorityOrder};
use error::ExitCode;
use progress::{ConsoleSink, ProgressSink};
use scanner::{ScanOutcome, ScanStats};
use session::{spawn_delete, spawn_scan, DeleteEvent, ScanEvent};

/// Scan result summary for `--output json`.
#[derive(Debug, Serialize)]
struct ScanSummary<'a> {
    duplicate_dirs: &'a BTreeSet<PathBuf>,
    stats: SummaryStats,
}

#[derive(Debug, Serialize)]
struct SummaryStats {
    total_files: usize,
    hashed_files: usize,
    failed_files: usize,
    skipped_roots: usize,
    duplicate_groups: usize,
}

impl From<&ScanStats> for SummaryStats {
    fn from(stats: &ScanStats) -> Self {
        Self {
            total_files: stats.total_files,
            hashed_files: stats.hashed_files,
            failed_files: stats.failed_files,
            skipped_roots: stats.skipped_roots,
            duplicate_groups: stats.duplicate_groups,
        }
    }
}

/// Run the application logic for a parsed command line.
///
/// # Errors
///
/// Returns an error for conditions that abort the whole invocation:
/// an unresolvable priority order, an unreadable order directory, or a
/// serialization failure. Per-file scan and deletion errors do not abort;
/// they surface through the exit code instead.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    let quiet = cli.quiet;

    match cli.command {
        Commands::Scan(args) => run_scan(args, quiet),
        Commands::Dedupe(args) => run_dedupe(args, quiet),
    }
}

/// Drain a scan worker's events into the console sink and return the
/// outcome.
fn drain_scan(roots: Vec<PathBuf>, quiet: bool) -> anyhow::Result<ScanOutcome> {
    let sink = ConsoleSink::new(quiet);
    let mut outcome = None;

    for event in spawn_scan(roots) {
        match event {
            ScanEvent::Progress(msg) => sink.report(&msg),
            ScanEvent::Finished(o) => outcome = Some(o),
            ScanEvent::Failed(reason) => {
                sink.finish_and_clear();
                anyhow::bail!("scan failed: {reason}");
            }
        }
    }
    sink.finish_and_clear();

    outcome.context("scan worker ended without a result")
}

fn run_scan(args: ScanArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    let outcome = drain_scan(args.roots, quiet)?;

    match args.output {
        OutputFormat::Json => {
            let summary = ScanSummary {
                duplicate_dirs: &outcome.duplicate_dirs,
                stats: SummaryStats::from(&outcome.stats),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            if outcome.duplicate_dirs.is_empty() {
                println!("No duplicates found.");
            } else {
                println!("Directories containing duplicates:");
                for dir in &outcome.duplicate_dirs {
                    println!("  {}", dir.display());
                }
                println!(
                    "{} duplicate group(s) across {} file(s).",
                    outcome.stats.duplicate_groups, outcome.stats.hashed_files
                );
            }
        }
    }

    Ok(scan_exit_code(&outcome))
}

fn run_dedupe(args: DedupeArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    // Index paths are canonical, so the order must be canonical too or
    // no directory would ever match its rank.
    let mut order_dirs = Vec::with_capacity(args.order.len());
    for dir in &args.order {
        let canonical = dir
            .canonicalize()
            .with_context(|| format!("cannot resolve order directory {}", dir.display()))?;
        order_dirs.push(canonical);
    }
    let order = PriorityOrder::new(order_dirs)?;

    let outcome = drain_scan(args.roots, quiet)?;
    if !outcome.has_duplicates() {
        println!("No duplicates found.");
        return Ok(scan_exit_code(&outcome));
    }

    let plan = plan(&outcome.index, &order)?;

    if args.apply {
        let report = drain_delete(plan, quiet)?;
        println!("{}", report.summary());
        Ok(delete_exit_code(&outcome.stats, &report))
    } else {
        print_dry_run(&plan, args.output)?;
        Ok(scan_exit_code(&outcome))
    }
}

/// Drain a delete worker's events, printing per-path outcomes.
fn drain_delete(plan: DeletionPlan, quiet: bool) -> anyhow::Result<DeleteReport> {
    let sink = ConsoleSink::new(quiet);
    let mut report = None;

    for event in spawn_delete(plan) {
        match event {
            DeleteEvent::Progress(msg) => sink.report(&msg),
            DeleteEvent::Deleted(path) => {
                if !quiet {
                    println!("Deleted {}", path.display());
                }
            }
            DeleteEvent::DeleteFailed(path, reason) => {
                eprintln!("Could not delete {}: {reason}", path.display());
            }
            DeleteEvent::Finished(r) => report = Some(r),
            DeleteEvent::Failed(reason) => {
                sink.finish_and_clear();
                anyhow::bail!("deletion failed: {reason}");
            }
        }
    }
    sink.finish_and_clear();

    report.context("delete worker ended without a result")
}

fn print_dry_run(plan: &DeletionPlan, output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
        }
        OutputFormat::Text => {
            if plan.is_empty() {
                println!("Nothing to delete.");
            } else {
                println!("Would delete {} file(s):", plan.len());
                for path in plan.paths() {
                    println!("  {}", path.display());
                }
                println!("Re-run with --apply to delete.");
            }
        }
    }
    Ok(())
}

fn scan_exit_code(outcome: &ScanOutcome) -> ExitCode {
    if !outcome.stats.is_clean() {
        ExitCode::PartialSuccess
    } else if outcome.has_duplicates() {
        ExitCode::Success
    } else {
        ExitCode::NoDuplicates
    }
}

fn delete_exit_code(stats: &ScanStats, report: &DeleteReport) -> ExitCode {
    if report.all_succeeded() && stats.is_clean() {
        ExitCode::Success
    } else {
        ExitCode::PartialSuccess
    }
}
