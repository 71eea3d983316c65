//! Directory walker built on walkdir.
//!
//! # Overview
//!
//! Enumerates every regular file under a single root. Children are sorted
//! by file name at each level so the discovery order is deterministic for
//! a fixed filesystem state; the tie-break rule in the priority resolver
//! depends on that order being stable.
//!
//! Symlinks are not followed and special files are skipped. Zero-length
//! files are skipped here unconditionally: they are never fingerprinted,
//! never considered duplicates, and never deleted.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// Walk a single root, yielding the path of every non-empty regular file.
///
/// Per-entry errors are yielded as [`ScanError`] values rather than
/// stopping iteration; the scan pipeline reports them and moves on.
///
/// # Example
///
/// ```no_run
/// use dirdedupe::scanner::walk_root;
/// use std::path::Path;
///
/// for entry in walk_root(Path::new("/data")) {
///     match entry {
///         Ok(path) => println!("{}", path.display()),
///         Err(e) => eprintln!("Warning: {}", e),
///     }
/// }
/// ```
pub fn walk_root(root: &Path) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry_result| match entry_result {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    return None;
                }

                let path = entry.path().to_path_buf();
                let metadata = match entry.metadata() {
                    Ok(m) => m,
                    Err(e) => {
                        let source = e
                            .into_io_error()
                            .unwrap_or_else(|| std::io::Error::other("metadata unavailable"));
                        return Some(Err(ScanError::from_io(&path, source)));
                    }
                };

                if metadata.len() == 0 {
                    log::debug!("Skipping empty file: {}", path.display());
                    return None;
                }

                Some(Ok(path))
            }
            Err(e) => {
                let path = e
                    .path()
                    .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("walk error"));
                Some(Err(ScanError::from_io(&path, source)))
            }
        })
}

/// Validate a scan root before walking it.
///
/// # Errors
///
/// Returns [`ScanError::NotFound`] if the root does not exist,
/// [`ScanError::NotADirectory`] if it is not a directory, and
/// [`ScanError::PermissionDenied`] or [`ScanError::Io`] if it cannot
/// be inspected. Callers report the error and skip the root; remaining
/// roots still scan.
pub fn check_root(root: &Path) -> Result<(), ScanError> {
    let metadata = std::fs::metadata(root).map_err(|e| ScanError::from_io(root, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}
