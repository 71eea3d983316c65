//! Duplicate grouping, directory priorities, and deletion planning.
//!
//! # Overview
//!
//! - [`index`]: the fingerprint-to-paths mapping a scan produces
//! - [`priority`]: directory ranking and survivor selection
//! - [`planner`]: turning an index plus a priority order into a deletion plan
//!
//! # Example
//!
//! ```no_run
//! use dirdedupe::duplicates::{plan, PriorityOrder};
//! use dirdedupe::progress::NullSink;
//! use dirdedupe::scanner::scan;
//! use std::path::PathBuf;
//!
//! let outcome = scan(&[PathBuf::from("/data")], &NullSink);
//! let order = PriorityOrder::new(outcome.duplicate_dirs.iter().cloned().collect())?;
//! let plan = plan(&outcome.index, &order)?;
//! for path in plan.paths() {
//!     println!("would delete {}", path.display());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod index;
pub mod planner;
pub mod priority;

pub use index::FingerprintIndex;
pub use planner::{plan, DeletionPlan, GroupPlan, PlanError};
pub use priority::{preferred_path, PriorityError, PriorityOrder, ResolveError};
