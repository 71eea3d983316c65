//! The fingerprint index built by a scan pass.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{FileRecord, Fingerprint};

/// Mapping from content fingerprint to the paths that share it.
///
/// Paths within an entry keep their discovery order from the walk; the
/// priority resolver's tie-break depends on that order. Every scanned path
/// appears in exactly one entry. An entry with fewer than two paths is not
/// a duplicate group.
///
/// The index is owned by a single scan session and rebuilt from scratch on
/// every scan.
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    map: HashMap<Fingerprint, Vec<PathBuf>>,
}

impl FingerprintIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path to the entry for `fingerprint`, creating the entry
    /// if this is the first path with that content.
    pub fn insert(&mut self, fingerprint: Fingerprint, path: PathBuf) {
        self.map.entry(fingerprint).or_default().push(path);
    }

    /// Consume a scanned file record into the index.
    pub fn add(&mut self, record: FileRecord) {
        self.insert(record.fingerprint, record.path);
    }

    /// Number of distinct fingerprints in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Total number of indexed paths across all entries.
    #[must_use]
    pub fn total_paths(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    /// Iterate over all entries, singletons included.
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &Vec<PathBuf>)> {
        self.map.iter()
    }

    /// Iterate over duplicate groups: entries with two or more paths.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = (&Fingerprint, &Vec<PathBuf>)> {
        self.map.iter().filter(|(_, paths)| paths.len() >= 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(seed: u8) -> Fingerprint {
        [seed; 32]
    }

    #[test]
    fn test_empty_index() {
        let index = FingerprintIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.total_paths(), 0);
        assert_eq!(index.duplicate_groups().count(), 0);
    }

    #[test]
    fn test_insert_groups_by_fingerprint() {
        let mut index = FingerprintIndex::new();
        index.insert(fp(1), PathBuf::from("/a/x.txt"));
        index.insert(fp(1), PathBuf::from("/b/x.txt"));
        index.insert(fp(2), PathBuf::from("/a/y.txt"));

        assert_eq!(index.len(), 2);
        assert_eq!(index.total_paths(), 3);
        assert_eq!(index.duplicate_groups().count(), 1);
    }

    #[test]
    fn test_discovery_order_preserved() {
        let mut index = FingerprintIndex::new();
        index.insert(fp(1), PathBuf::from("/z/first.txt"));
        index.insert(fp(1), PathBuf::from("/a/second.txt"));
        index.insert(fp(1), PathBuf::from("/m/third.txt"));

        let (_, paths) = index.duplicate_groups().next().unwrap();
        assert_eq!(
            paths,
            &vec![
                PathBuf::from("/z/first.txt"),
                PathBuf::from("/a/second.txt"),
                PathBuf::from("/m/third.txt"),
            ]
        );
    }

    #[test]
    fn test_add_record() {
        let mut index = FingerprintIndex::new();
        index.add(FileRecord::new(PathBuf::from("/a/x.txt"), fp(9)));
        index.add(FileRecord::new(PathBuf::from("/b/x.txt"), fp(9)));

        assert_eq!(index.duplicate_groups().count(), 1);
    }

    #[test]
    fn test_singletons_not_duplicate_groups() {
        let mut index = FingerprintIndex::new();
        index.insert(fp(1), PathBuf::from("/a/x.txt"));
        index.insert(fp(2), PathBuf::from("/a/y.txt"));

        assert_eq!(index.duplicate_groups().count(), 0);
        assert_eq!(index.iter().count(), 2);
    }
}
