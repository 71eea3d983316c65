//! Actions that mutate the filesystem.

pub mod delete;

pub use delete::{execute, DeleteObserver, DeleteReport, NullObserver};
