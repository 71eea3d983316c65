//! Background workers for the long-running operations.
//!
//! # Overview
//!
//! Scanning and deletion are I/O-bound and can take arbitrarily long, so
//! they must not block an interactive caller. Each operation runs on a
//! dedicated thread and delivers its events over an mpsc channel: zero or
//! more progress messages, then exactly one terminal event (finished or
//! failed), after which the channel closes.
//!
//! Only one scan and one deletion may be in flight at a time per session;
//! enforcing that is the caller's responsibility. There is no
//! cancellation: a started operation runs to completion, absorbing
//! per-file failures as it goes.
//!
//! The producing worker builds the [`ScanOutcome`] or [`DeleteReport`]
//! alone and hands it off by move in the terminal event, so no shared
//! state is ever mutated from two threads.
//!
//! # Example
//!
//! ```no_run
//! use dirdedupe::session::{spawn_scan, ScanEvent};
//! use std::path::PathBuf;
//!
//! let events = spawn_scan(vec![PathBuf::from("/data")]);
//! for event in events {
//!     match event {
//!         ScanEvent::Progress(msg) => println!("{msg}"),
//!         ScanEvent::Finished(outcome) => {
//!             println!("{} duplicate dirs", outcome.duplicate_dirs.len());
//!         }
//!         ScanEvent::Failed(reason) => eprintln!("scan failed: {reason}"),
//!     }
//! }
//! ```

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use crate::actions::delete::{execute, DeleteObserver};
use crate::duplicates::DeletionPlan;
use crate::progress::ProgressSink;
use crate::scanner::{scan, ScanOutcome};

/// Events delivered by a scan worker.
#[derive(Debug)]
pub enum ScanEvent {
    /// A free-text status message
    Progress(String),
    /// Terminal: the scan finished and this is its outcome
    Finished(ScanOutcome),
    /// Terminal: the worker itself failed
    Failed(String),
}

/// Events delivered by a deletion worker.
#[derive(Debug)]
pub enum DeleteEvent {
    /// A free-text status message
    Progress(String),
    /// A planned path was removed
    Deleted(PathBuf),
    /// A planned path could not be removed; the batch continued
    DeleteFailed(PathBuf, String),
    /// Terminal: the batch finished and this is its report
    Finished(crate::actions::DeleteReport),
    /// Terminal: the worker itself failed
    Failed(String),
}

/// Progress sink that forwards messages into an event channel.
struct ChannelSink<T> {
    tx: Sender<T>,
    wrap: fn(String) -> T,
}

impl<T: Send> ProgressSink for ChannelSink<T> {
    fn report(&self, message: &str) {
        // A send error means the consumer hung up; the worker keeps
        // running to completion regardless.
        let _ = self.tx.send((self.wrap)(message.to_string()));
    }
}

/// Observer that forwards per-path outcomes into the event channel.
struct ChannelObserver {
    tx: Sender<DeleteEvent>,
}

impl DeleteObserver for ChannelObserver {
    fn on_deleted(&self, path: &std::path::Path) {
        let _ = self.tx.send(DeleteEvent::Deleted(path.to_path_buf()));
    }

    fn on_failed(&self, path: &std::path::Path, reason: &str) {
        let _ = self
            .tx
            .send(DeleteEvent::DeleteFailed(path.to_path_buf(), reason.to_string()));
    }
}

/// Run a scan on a worker thread.
///
/// Returns the receiving end of the event channel. The channel yields
/// progress events followed by exactly one [`ScanEvent::Finished`] or
/// [`ScanEvent::Failed`], then closes.
pub fn spawn_scan(roots: Vec<PathBuf>) -> Receiver<ScanEvent> {
    let (tx, rx) = channel();

    let builder = thread::Builder::new().name("dirdedupe-scan".into());
    let spawn_tx = tx.clone();
    let spawned = builder.spawn(move || {
        let sink = ChannelSink {
            tx: spawn_tx.clone(),
            wrap: ScanEvent::Progress,
        };
        let outcome = scan(&roots, &sink);
        let _ = spawn_tx.send(ScanEvent::Finished(outcome));
    });

    if let Err(e) = spawned {
        log::error!("Failed to spawn scan worker: {}", e);
        let _ = tx.send(ScanEvent::Failed(format!("could not spawn worker: {e}")));
    }

    rx
}

/// Run a deletion batch on a worker thread.
///
/// Returns the receiving end of the event channel. The channel yields
/// progress and per-path outcome events followed by exactly one
/// [`DeleteEvent::Finished`] or [`DeleteEvent::Failed`], then closes.
pub fn spawn_delete(plan: DeletionPlan) -> Receiver<DeleteEvent> {
    let (tx, rx) = channel();

    let builder = thread::Builder::new().name("dirdedupe-delete".into());
    let spawn_tx = tx.clone();
    let spawned = builder.spawn(move || {
        let sink = ChannelSink {
            tx: spawn_tx.clone(),
            wrap: DeleteEvent::Progress,
        };
        let observer = ChannelObserver {
            tx: spawn_tx.clone(),
        };
        let report = execute(&plan, &sink, &observer);
        let _ = spawn_tx.send(DeleteEvent::Finished(report));
    });

    if let Err(e) = spawned {
        log::error!("Failed to spawn delete worker: {}", e);
        let _ = tx.send(DeleteEvent::Failed(format!("could not spawn worker: {e}")));
    }

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::{plan, PriorityOrder};
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &std::path::Path, name: &str, content: &[u8]) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(content).unwrap();
    }

    #[test]
    fn test_spawn_scan_delivers_terminal_event_last() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"dup");
        write_file(dir.path(), "b.txt", b"dup");

        let events: Vec<_> = spawn_scan(vec![dir.path().to_path_buf()]).iter().collect();

        assert!(events.len() >= 2);
        assert!(events[..events.len() - 1]
            .iter()
            .all(|e| matches!(e, ScanEvent::Progress(_))));
        match events.last().unwrap() {
            ScanEvent::Finished(outcome) => {
                assert_eq!(outcome.stats.duplicate_groups, 1);
            }
            other => panic!("expected Finished, got {other:?}"),
        }
    }

    #[test]
    fn test_spawn_delete_streams_outcomes() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        write_file(a.path(), "x.txt", b"dup");
        write_file(b.path(), "x.txt", b"dup");

        let mut index = crate::duplicates::FingerprintIndex::new();
        index.insert([1u8; 32], a.path().join("x.txt"));
        index.insert([1u8; 32], b.path().join("x.txt"));
        let order =
            PriorityOrder::new(vec![a.path().to_path_buf(), b.path().to_path_buf()]).unwrap();
        let plan = plan(&index, &order).unwrap();

        let events: Vec<_> = spawn_delete(plan).iter().collect();

        let deleted: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, DeleteEvent::Deleted(_)))
            .collect();
        assert_eq!(deleted.len(), 1);
        assert!(matches!(events.last().unwrap(), DeleteEvent::Finished(r) if r.all_succeeded()));
        assert!(!a.path().join("x.txt").exists());
        assert!(b.path().join("x.txt").exists());
    }

    #[test]
    fn test_scan_worker_does_not_block_caller() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"content");

        // The receiver is available immediately; events arrive as the
        // worker produces them.
        let rx = spawn_scan(vec![dir.path().to_path_buf()]);
        let first = rx.recv().unwrap();
        assert!(matches!(first, ScanEvent::Progress(_)));
        // Drain the rest so the worker finishes cleanly.
        for _ in rx.iter() {}
    }
}
