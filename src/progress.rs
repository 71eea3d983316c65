//! Progress reporting sinks.
//!
//! Scanner and deleter emit free-text status strings through a
//! [`ProgressSink`] from their own execution context. Consumers display
//! the strings as-is; no semantic meaning should be parsed from them.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A sink for human-readable status messages.
///
/// Invoked synchronously by the scanner and the deleter. Implementations
/// that marshal messages to another execution context (a channel, a UI
/// event loop) do so on their own.
pub trait ProgressSink: Send + Sync {
    /// Deliver one status message.
    fn report(&self, message: &str);
}

/// A sink that discards every message.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&self, _message: &str) {}
}

/// A sink that stores messages in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    /// Create an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages received so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("sink lock poisoned").clone()
    }
}

impl ProgressSink for CollectingSink {
    fn report(&self, message: &str) {
        self.messages
            .lock()
            .expect("sink lock poisoned")
            .push(message.to_string());
    }
}

/// Terminal sink backed by an indicatif spinner.
///
/// Status messages replace the spinner message; the spinner itself shows
/// elapsed time so long scans visibly make progress.
pub struct ConsoleSink {
    bar: ProgressBar,
}

impl ConsoleSink {
    /// Create a console sink. With `quiet` set, the spinner is hidden and
    /// messages are dropped.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { bar }
    }

    /// Stop the spinner, leaving the last message visible.
    pub fn finish(&self) {
        self.bar.finish();
    }

    /// Stop the spinner and clear its line.
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for ConsoleSink {
    fn report(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }
}
