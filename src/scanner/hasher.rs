//! Streamed SHA-256 file fingerprinting.
//!
//! # Overview
//!
//! Two files are considered identical if and only if their fingerprints
//! match; the collision probability of SHA-256 is treated as negligible
//! and is not guarded against.
//!
//! Files are read in fixed-size sequential chunks so memory use stays
//! bounded regardless of file size.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::HashError;

/// A 32-byte SHA-256 content fingerprint.
pub type Fingerprint = [u8; 32];

/// Chunk size for streamed reads. Not user-configurable.
pub const CHUNK_SIZE: usize = 8192;

/// Render a fingerprint as a lowercase hex string.
///
/// # Example
///
/// ```
/// use dirdedupe::scanner::fingerprint_to_hex;
///
/// let mut fp = [0u8; 32];
/// fp[0] = 0xAB;
/// assert!(fingerprint_to_hex(&fp).starts_with("ab00"));
/// ```
#[must_use]
pub fn fingerprint_to_hex(fingerprint: &Fingerprint) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(64);
    for byte in fingerprint {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Compute the SHA-256 fingerprint of a file's full byte content.
///
/// Reads the file in [`CHUNK_SIZE`] chunks and folds them into the digest.
/// Does not mutate filesystem state.
///
/// # Errors
///
/// Returns [`HashError`] if the file cannot be opened or a read fails
/// mid-stream. The scanner catches this per-file and continues rather
/// than aborting the whole scan.
pub fn fingerprint(path: &Path) -> Result<Fingerprint, HashError> {
    let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| HashError::from_io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hasher.finalize().into())
}
