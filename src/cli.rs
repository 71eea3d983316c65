//! Command-line interface definitions.
//!
//! The CLI is the stand-in for an interactive front end: it supplies
//! scan roots and a directory priority ordering, and displays the
//! progress events the core emits.
//!
//! # Example
//!
//! ```bash
//! # Find which directories hold duplicates
//! dirdedupe scan ~/photos ~/backup
//!
//! # Preview what a de-dupe would remove (dry run is the default)
//! dirdedupe dedupe ~/photos ~/backup --order ~/backup --order ~/photos
//!
//! # Actually delete
//! dirdedupe dedupe ~/photos ~/backup --order ~/backup --order ~/photos --apply
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Directory-priority duplicate file finder and remover.
///
/// Finds files with identical content across a set of directory trees
/// and removes every copy except the one in the most-preferred
/// directory.
#[derive(Debug, Parser)]
#[command(name = "dirdedupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan directories and report which ones contain duplicates
    Scan(ScanArgs),
    /// Scan, then delete duplicates according to a priority order
    Dedupe(DedupeArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Root directories to scan
    #[arg(value_name = "DIR", required = true)]
    pub roots: Vec<PathBuf>,

    /// Output format for the result summary
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the dedupe subcommand.
#[derive(Debug, Args)]
pub struct DedupeArgs {
    /// Root directories to scan
    #[arg(value_name = "DIR", required = true)]
    pub roots: Vec<PathBuf>,

    /// Directory priority order; repeat the flag once per directory.
    ///
    /// Position is preference: directories given later are more
    /// preferred and their copies are kept. Every directory that holds
    /// a duplicate must be listed or planning fails.
    #[arg(long = "order", value_name = "DIR", required = true)]
    pub order: Vec<PathBuf>,

    /// Actually delete files. Without this flag the plan is only
    /// printed (dry run).
    #[arg(long)]
    pub apply: bool,

    /// Output format for the dry-run plan
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output formats for scan summaries and dry-run plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Machine-readable JSON
    Json,
}
