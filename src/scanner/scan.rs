//! The scan pipeline: walk, fingerprint, group.
//!
//! # Overview
//!
//! [`scan`] drives the whole discovery pass:
//! 1. Validate and canonicalize each root; unreadable roots are reported
//!    and skipped, the remaining roots still scan.
//! 2. Pre-pass: count the files that will be fingerprinted, so progress
//!    messages can carry a processed/total counter.
//! 3. Fingerprint every non-empty regular file and append its path to the
//!    [`FingerprintIndex`]. Per-file read errors are reported and the file
//!    is excluded; they never abort the scan.
//! 4. Derive the set of directories that contain at least one member of a
//!    duplicate group.
//!
//! The pipeline is read-only with respect to the filesystem. It is
//! long-running and I/O-bound; callers that must stay responsive run it
//! through [`crate::session::spawn_scan`] rather than calling it inline.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::duplicates::FingerprintIndex;
use crate::progress::ProgressSink;

use super::{hasher, walker, FileRecord, ScanError};

/// Emit a processed/total progress message every this many files.
const PROGRESS_INTERVAL: usize = 10;

/// Statistics from a scan pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Number of files counted by the pre-pass
    pub total_files: usize,
    /// Number of files successfully fingerprinted
    pub hashed_files: usize,
    /// Number of files that failed to read (excluded from the index)
    pub failed_files: usize,
    /// Number of roots that could not be enumerated and were skipped
    pub skipped_roots: usize,
    /// Number of duplicate groups (fingerprints with 2+ paths)
    pub duplicate_groups: usize,
}

impl ScanStats {
    /// Whether the scan completed without any per-file or per-root errors.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_files == 0 && self.skipped_roots == 0
    }
}

/// Everything a scan pass produces.
///
/// Owned exclusively by one scan session and rebuilt from scratch on every
/// scan; there is no merging with previous results.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Fingerprint-to-paths mapping for all scanned files
    pub index: FingerprintIndex,
    /// Directories containing at least one member of a duplicate group.
    ///
    /// Seeds the caller's priority-ordering list; deletion logic recomputes
    /// directory membership per path and does not rely on this set.
    pub duplicate_dirs: BTreeSet<PathBuf>,
    /// Counters for summary display
    pub stats: ScanStats,
}

impl ScanOutcome {
    /// Whether any duplicate group was found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.stats.duplicate_groups > 0
    }
}

/// Scan a set of root directories for duplicate files.
///
/// Roots are canonicalized so that every indexed path is absolute; a root
/// that cannot be canonicalized or enumerated is reported through the
/// progress sink and skipped. Discovery order within a root is
/// deterministic (children sorted by file name), which fixes the
/// first-discovered tie-break used later by the priority resolver.
pub fn scan(roots: &[PathBuf], progress: &dyn ProgressSink) -> ScanOutcome {
    let mut stats = ScanStats::default();
    progress.report(&format!("Scanning {} directories", roots.len()));

    let usable_roots = validate_roots(roots, progress, &mut stats);

    // Pre-pass so progress messages can say "X/Y".
    let total_files: usize = usable_roots
        .iter()
        .map(|root| walker::walk_root(root).filter(|r| r.is_ok()).count())
        .sum();
    stats.total_files = total_files;
    log::info!("Scan pre-pass counted {} files", total_files);

    let mut index = FingerprintIndex::new();
    let mut processed = 0usize;

    for root in &usable_roots {
        progress.report(&format!("Entering {}", root.display()));

        for entry in walker::walk_root(root) {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    progress.report(&format!("Skipping unreadable entry: {e}"));
                    continue;
                }
            };

            processed += 1;
            match hasher::fingerprint(&path) {
                Ok(fp) => {
                    index.add(FileRecord::new(path, fp));
                    stats.hashed_files += 1;
                }
                Err(e) => {
                    log::warn!("Could not read {}: {}", path.display(), e);
                    progress.report(&format!("Could not read {}: {e}", path.display()));
                    stats.failed_files += 1;
                }
            }

            if processed % PROGRESS_INTERVAL == 0 {
                progress.report(&format!("Processed {processed}/{total_files} files"));
            }
        }
    }

    let duplicate_dirs = duplicate_directories(&index);
    stats.duplicate_groups = index.duplicate_groups().count();

    progress.report(&format!(
        "Scan complete: {} files, {} duplicate groups across {} directories",
        stats.hashed_files,
        stats.duplicate_groups,
        duplicate_dirs.len()
    ));
    log::info!(
        "Scan complete: {} hashed, {} failed, {} groups",
        stats.hashed_files,
        stats.failed_files,
        stats.duplicate_groups
    );

    ScanOutcome {
        index,
        duplicate_dirs,
        stats,
    }
}

/// Canonicalize roots and drop the ones that cannot be enumerated.
fn validate_roots(
    roots: &[PathBuf],
    progress: &dyn ProgressSink,
    stats: &mut ScanStats,
) -> Vec<PathBuf> {
    let mut usable = Vec::with_capacity(roots.len());

    for root in roots {
        if let Err(e) = walker::check_root(root) {
            log::warn!("Skipping root: {}", e);
            progress.report(&format!("Skipping root: {e}"));
            stats.skipped_roots += 1;
            continue;
        }
        match root.canonicalize() {
            Ok(canonical) => usable.push(canonical),
            Err(e) => {
                let err = ScanError::from_io(root, e);
                log::warn!("Skipping root: {}", err);
                progress.report(&format!("Skipping root: {err}"));
                stats.skipped_roots += 1;
            }
        }
    }

    usable
}

/// Collect the parent directory of every path that belongs to a duplicate
/// group. Each directory appears once even if it contributes to several
/// groups.
fn duplicate_directories(index: &FingerprintIndex) -> BTreeSet<PathBuf> {
    let mut dirs = BTreeSet::new();
    for (_, paths) in index.duplicate_groups() {
        for path in paths {
            if let Some(parent) = path.parent() {
                dirs.insert(parent.to_path_buf());
            }
        }
    }
    dirs
}
