//! Deletion-plan execution.
//!
//! # Overview
//!
//! Removes every path in a [`DeletionPlan`], isolating per-path failures:
//! one file that cannot be removed never stops the batch. Deletions are
//! not transactional and there is no rollback; a partially completed
//! batch leaves exactly the successfully removed files gone and the rest
//! intact. The caller's recovery path is a re-scan.
//!
//! Coarse progress is keyed by duplicate-group index ("processing group
//! N/M") so large duplicate sets show movement without a message per
//! file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::duplicates::DeletionPlan;
use crate::progress::ProgressSink;

/// Structured per-path outcome callbacks for a deletion batch.
///
/// Implementations marshal outcomes wherever they need to go (a channel,
/// a result table); the deleter calls them synchronously.
pub trait DeleteObserver: Send + Sync {
    /// Called when the deleter moves to the next duplicate group.
    fn on_group_start(&self, _index: usize, _total: usize) {}

    /// Called after a path was removed.
    fn on_deleted(&self, path: &Path);

    /// Called after a removal failed; the batch continues.
    fn on_failed(&self, path: &Path, reason: &str);
}

/// Observer that ignores every outcome.
#[derive(Debug, Default)]
pub struct NullObserver;

impl DeleteObserver for NullObserver {
    fn on_deleted(&self, _path: &Path) {}
    fn on_failed(&self, _path: &Path, _reason: &str) {}
}

/// Results of executing a deletion plan.
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    /// Paths that were removed
    pub deleted: Vec<PathBuf>,
    /// Paths that could not be removed, with the reason
    pub failures: Vec<(PathBuf, String)>,
}

impl DeleteReport {
    /// Number of successful removals.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.deleted.len()
    }

    /// Number of failed removals.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted removals.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.deleted.len() + self.failures.len()
    }

    /// Check if every removal succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the batch.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!("Deleted {} file(s)", self.success_count())
        } else {
            format!(
                "Deleted {} file(s), {} failed",
                self.success_count(),
                self.failure_count()
            )
        }
    }
}

/// Execute a deletion plan.
///
/// Attempts removal of every planned path. Successes and failures are
/// reported through `progress` as free text and through `observer` as
/// structured outcomes, then collected into the returned report.
///
/// Long-running and I/O-bound; callers that must stay responsive run it
/// through [`crate::session::spawn_delete`] rather than calling it
/// inline.
pub fn execute(
    plan: &DeletionPlan,
    progress: &dyn ProgressSink,
    observer: &dyn DeleteObserver,
) -> DeleteReport {
    let mut report = DeleteReport::default();
    let total_groups = plan.groups().len();

    for (group_idx, group) in plan.groups().iter().enumerate() {
        progress.report(&format!(
            "Processing group {}/{}",
            group_idx + 1,
            total_groups
        ));
        observer.on_group_start(group_idx + 1, total_groups);
        log::debug!("Keeping {}", group.keep.display());

        for path in &group.remove {
            match fs::remove_file(path) {
                Ok(()) => {
                    log::info!("Deleted {}", path.display());
                    progress.report(&format!("Deleted {}", path.display()));
                    observer.on_deleted(path);
                    report.deleted.push(path.clone());
                }
                Err(e) => {
                    log::warn!("Could not delete {}: {}", path.display(), e);
                    progress.report(&format!("Could not delete {}: {e}", path.display()));
                    observer.on_failed(path, &e.to_string());
                    report.failures.push((path.clone(), e.to_string()));
                }
            }
        }
    }

    progress.report(&report.summary());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::{plan, FingerprintIndex, PriorityOrder};
    use crate::progress::{CollectingSink, NullSink};
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    /// Build a plan straight from on-disk duplicates across two dirs.
    fn plan_for(dir_a: &Path, dir_b: &Path) -> DeletionPlan {
        let mut index = FingerprintIndex::new();
        index.insert([1u8; 32], dir_a.join("x.txt"));
        index.insert([1u8; 32], dir_b.join("x.txt"));
        let order =
            PriorityOrder::new(vec![dir_a.to_path_buf(), dir_b.to_path_buf()]).unwrap();
        plan(&index, &order).unwrap()
    }

    #[test]
    fn test_execute_removes_planned_paths() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let doomed = write_file(a.path(), "x.txt", b"dup");
        let kept = write_file(b.path(), "x.txt", b"dup");

        let plan = plan_for(a.path(), b.path());
        let report = execute(&plan, &NullSink, &NullObserver);

        assert!(report.all_succeeded());
        assert_eq!(report.deleted, vec![doomed.clone()]);
        assert!(!doomed.exists());
        assert!(kept.exists());
    }

    #[test]
    fn test_execute_isolates_failures() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let missing = write_file(a.path(), "x.txt", b"dup");
        write_file(b.path(), "x.txt", b"dup");

        let c = TempDir::new().unwrap();
        let d = TempDir::new().unwrap();
        let doomed = write_file(c.path(), "x.txt", b"other dup");
        write_file(d.path(), "x.txt", b"other dup");

        let mut index = FingerprintIndex::new();
        index.insert([1u8; 32], a.path().join("x.txt"));
        index.insert([1u8; 32], b.path().join("x.txt"));
        index.insert([2u8; 32], c.path().join("x.txt"));
        index.insert([2u8; 32], d.path().join("x.txt"));
        let order = PriorityOrder::new(vec![
            a.path().to_path_buf(),
            b.path().to_path_buf(),
            c.path().to_path_buf(),
            d.path().to_path_buf(),
        ])
        .unwrap();
        let plan = plan(&index, &order).unwrap();

        // Make one planned path unremovable before execution.
        fs::remove_file(&missing).unwrap();

        let report = execute(&plan, &NullSink, &NullObserver);

        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures[0].0, missing);
        assert_eq!(report.success_count(), 1);
        assert!(!doomed.exists());
    }

    #[test]
    fn test_execute_emits_group_progress() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        write_file(a.path(), "x.txt", b"dup");
        write_file(b.path(), "x.txt", b"dup");

        let plan = plan_for(a.path(), b.path());
        let sink = CollectingSink::new();
        execute(&plan, &sink, &NullObserver);

        let messages = sink.messages();
        assert_eq!(messages[0], "Processing group 1/1");
        assert!(messages[1].starts_with("Deleted "));
        assert_eq!(messages[2], "Deleted 1 file(s)");
    }

    #[test]
    fn test_observer_receives_outcomes() {
        struct Recorder(Mutex<Vec<String>>);
        impl DeleteObserver for Recorder {
            fn on_deleted(&self, path: &Path) {
                self.0.lock().unwrap().push(format!("ok {}", path.display()));
            }
            fn on_failed(&self, path: &Path, _reason: &str) {
                self.0
                    .lock()
                    .unwrap()
                    .push(format!("fail {}", path.display()));
            }
        }

        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let doomed = write_file(a.path(), "x.txt", b"dup");
        write_file(b.path(), "x.txt", b"dup");

        let plan = plan_for(a.path(), b.path());
        let recorder = Recorder(Mutex::new(Vec::new()));
        execute(&plan, &NullSink, &recorder);

        let events = recorder.0.into_inner().unwrap();
        assert_eq!(events, vec![format!("ok {}", doomed.display())]);
    }

    #[test]
    fn test_empty_plan_reports_nothing_deleted() {
        let report = execute(&DeletionPlan::default(), &NullSink, &NullObserver);
        assert_eq!(report.total_count(), 0);
        assert_eq!(report.summary(), "Deleted 0 file(s)");
    }
}
