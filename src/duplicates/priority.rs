//! Directory priority ranking and survivor selection.
//!
//! # Overview
//!
//! The caller supplies an ordered list of directories. A directory's rank
//! is its position in that list and a higher rank means files there are
//! preferred, so the last directory in the list is the most preferred.
//!
//! The rank map is built once per deduplication pass; selection never
//! falls back to list-index lookups.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors constructing a [`PriorityOrder`].
#[derive(Debug, Error)]
pub enum PriorityError {
    /// The same directory was listed more than once. Ranks would be
    /// ambiguous, so this is rejected up front rather than silently
    /// keeping one of the two positions.
    #[error("directory listed more than once in priority order: {0}")]
    DuplicateDirectory(PathBuf),
}

/// Errors resolving the preferred path of a duplicate group.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A group member's parent directory is absent from the priority
    /// order. The plan cannot be computed correctly, so this is surfaced
    /// rather than defaulting the rank to zero or skipping the file.
    #[error("no rank for directory {directory} (member {path})")]
    UnrankedDirectory {
        /// The group member whose directory is unranked
        path: PathBuf,
        /// The unranked parent directory
        directory: PathBuf,
    },

    /// The group had no members. Duplicate groups always have two or
    /// more paths, so this indicates a caller bug.
    #[error("cannot resolve an empty duplicate group")]
    EmptyGroup,
}

/// User-specified ranking of directories.
///
/// Directories that appear in the order but contain no scanned files are
/// dead entries: they consume a rank but never affect a resolution.
#[derive(Debug, Clone)]
pub struct PriorityOrder {
    dirs: Vec<PathBuf>,
    ranks: HashMap<PathBuf, usize>,
}

impl PriorityOrder {
    /// Build an order from an ordered directory list.
    ///
    /// # Errors
    ///
    /// Returns [`PriorityError::DuplicateDirectory`] if a directory
    /// appears more than once.
    pub fn new(dirs: Vec<PathBuf>) -> Result<Self, PriorityError> {
        let mut ranks = HashMap::with_capacity(dirs.len());
        for (rank, dir) in dirs.iter().enumerate() {
            if ranks.insert(dir.clone(), rank).is_some() {
                return Err(PriorityError::DuplicateDirectory(dir.clone()));
            }
        }
        Ok(Self { dirs, ranks })
    }

    /// Rank of a directory, if it is part of the order.
    #[must_use]
    pub fn rank(&self, dir: &Path) -> Option<usize> {
        self.ranks.get(dir).copied()
    }

    /// The directories in rank order (least preferred first).
    #[must_use]
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Number of ranked directories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Check if the order is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Select the single path to keep from a duplicate group.
///
/// A single pass tracks the best-so-far member and its rank. The
/// comparison is strictly greater-than, so when several members share the
/// most-preferred directory the first one in the group's discovery order
/// wins. That tie-break is deliberate and documented behavior, not an
/// accident of iteration.
///
/// # Errors
///
/// Returns [`ResolveError::UnrankedDirectory`] if any member's parent
/// directory is missing from `order`, and [`ResolveError::EmptyGroup`]
/// for an empty group.
pub fn preferred_path<'a>(
    group: &'a [PathBuf],
    order: &PriorityOrder,
) -> Result<&'a Path, ResolveError> {
    let mut best: Option<(&'a Path, usize)> = None;

    for path in group {
        let directory = path.parent().unwrap_or_else(|| Path::new(""));
        let rank = order
            .rank(directory)
            .ok_or_else(|| ResolveError::UnrankedDirectory {
                path: path.clone(),
                directory: directory.to_path_buf(),
            })?;

        match best {
            Some((_, best_rank)) if rank <= best_rank => {}
            _ => best = Some((path.as_path(), rank)),
        }
    }

    best.map(|(path, _)| path).ok_or(ResolveError::EmptyGroup)
}
