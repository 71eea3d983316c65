//! Deletion-plan computation.
//!
//! The same [`plan`] call backs both the dry-run preview and the actual
//! deletion, so the preview exactly predicts what deletion will do given
//! the same on-disk state.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::index::FingerprintIndex;
use super::priority::{preferred_path, PriorityOrder, ResolveError};

/// Errors computing a deletion plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A duplicate group could not be resolved against the priority
    /// order. Fatal for this planning invocation; the caller's recovery
    /// path is to supply a complete order and plan again.
    #[error("priority resolution failed: {0}")]
    Resolve(#[from] ResolveError),
}

/// Keep/delete decision for one duplicate group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupPlan {
    /// The surviving path, chosen by the priority resolver
    pub keep: PathBuf,
    /// Every other member of the group, lexicographically sorted
    pub remove: Vec<PathBuf>,
}

/// The full list of paths marked for removal.
///
/// Groups are sorted by keeper path and removals within each group are
/// sorted lexicographically, so repeated calls on the same index and
/// order produce an identical plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeletionPlan {
    groups: Vec<GroupPlan>,
}

impl DeletionPlan {
    /// The per-group keep/delete decisions.
    #[must_use]
    pub fn groups(&self) -> &[GroupPlan] {
        &self.groups
    }

    /// Total number of paths marked for removal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.remove.len()).sum()
    }

    /// Check if nothing is marked for removal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All planned paths in lexicographic order, for stable dry-run
    /// display.
    #[must_use]
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = self
            .groups
            .iter()
            .flat_map(|g| g.remove.iter().map(PathBuf::as_path))
            .collect();
        paths.sort_unstable();
        paths
    }
}

/// Compute the deletion plan for an index under a priority order.
///
/// For every fingerprint group of size two or more the preferred path is
/// resolved and every other member enters the plan.
///
/// # Errors
///
/// Returns [`PlanError::Resolve`] if any group member's directory is
/// absent from `order`. No partial plan is returned.
pub fn plan(index: &FingerprintIndex, order: &PriorityOrder) -> Result<DeletionPlan, PlanError> {
    let mut groups = Vec::new();

    for (_, members) in index.duplicate_groups() {
        let keep = preferred_path(members, order)?.to_path_buf();
        let mut remove: Vec<PathBuf> = members
            .iter()
            .filter(|path| path.as_path() != keep)
            .cloned()
            .collect();
        remove.sort_unstable();

        log::debug!(
            "Group keeps {} and removes {} file(s)",
            keep.display(),
            remove.len()
        );
        groups.push(GroupPlan { keep, remove });
    }

    groups.sort_unstable_by(|a, b| a.keep.cmp(&b.keep));
    Ok(DeletionPlan { groups })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(dirs: &[&str]) -> PriorityOrder {
        PriorityOrder::new(dirs.iter().map(PathBuf::from).collect()).unwrap()
    }

    fn index_of(groups: &[&[&str]]) -> FingerprintIndex {
        let mut index = FingerprintIndex::new();
        for (i, group) in groups.iter().enumerate() {
            for path in group.iter() {
                index.insert([i as u8; 32], PathBuf::from(path));
            }
        }
        index
    }

    #[test]
    fn test_plan_keeps_preferred_member() {
        let index = index_of(&[&["/a/x.txt", "/b/x.txt"]]);
        let order = order(&["/a", "/b"]);

        let plan = plan(&index, &order).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.paths(), vec![Path::new("/a/x.txt")]);
        assert_eq!(plan.groups()[0].keep, Path::new("/b/x.txt"));
    }

    #[test]
    fn test_plan_never_contains_keeper() {
        let index = index_of(&[
            &["/a/x.txt", "/b/x.txt", "/c/x.txt"],
            &["/a/y.txt", "/c/y.txt"],
        ]);
        let order = order(&["/a", "/b", "/c"]);

        let plan = plan(&index, &order).unwrap();

        for group in plan.groups() {
            assert!(!group.remove.contains(&group.keep));
        }
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let index = index_of(&[
            &["/b/x.txt", "/a/x.txt"],
            &["/c/y.txt", "/a/y.txt"],
            &["/a/z.txt", "/c/z.txt", "/b/z.txt"],
        ]);
        let order = order(&["/c", "/b", "/a"]);

        let first = plan(&index, &order).unwrap();
        let second = plan(&index, &order).unwrap();

        assert_eq!(first.paths(), second.paths());
        let keeps: Vec<_> = first.groups().iter().map(|g| &g.keep).collect();
        let keeps2: Vec<_> = second.groups().iter().map(|g| &g.keep).collect();
        assert_eq!(keeps, keeps2);
    }

    #[test]
    fn test_plan_paths_sorted_lexicographically() {
        let index = index_of(&[
            &["/z/x.txt", "/p/x.txt", "/a/x.txt"],
            &["/m/y.txt", "/b/y.txt"],
        ]);
        let order = order(&["/z", "/p", "/a", "/m", "/b"]);

        let plan = plan(&index, &order).unwrap();
        let paths = plan.paths();

        let mut sorted = paths.clone();
        sorted.sort_unstable();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_plan_unranked_directory_fails() {
        let index = index_of(&[&["/a/x.txt", "/c/x.txt"]]);
        let order = order(&["/a"]);

        let err = plan(&index, &order).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Resolve(ResolveError::UnrankedDirectory { .. })
        ));
    }

    #[test]
    fn test_plan_empty_index() {
        let index = FingerprintIndex::new();
        let order = order(&["/a"]);

        let plan = plan(&index, &order).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_plan_singletons_ignored() {
        let mut index = FingerprintIndex::new();
        index.insert([1u8; 32], PathBuf::from("/a/unique.txt"));
        let order = order(&["/a"]);

        let plan = plan(&index, &order).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let index = index_of(&[&["/a/x.txt", "/b/x.txt"]]);
        let order = order(&["/a", "/b"]);

        let plan = plan(&index, &order).unwrap();
        let json = serde_json::to_string(&plan).unwrap();

        assert!(json.contains("/b/x.txt"));
        assert!(json.contains("remove"));
    }
}
