//! Process exit codes.

/// Exit codes for the dirdedupe binary.
///
/// - 0: completed normally, duplicates found and handled
/// - 1: unexpected failure
/// - 2: completed normally, no duplicates found
/// - 3: completed with some non-fatal per-file errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Completed and duplicates were found.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// Completed but no duplicates were found.
    NoDuplicates = 2,
    /// Completed but some files or roots were skipped, or some
    /// deletions failed.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
