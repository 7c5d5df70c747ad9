//! Pure functions for mapping repository errors to process exit codes.
//!
//! Codes follow the BSD `sysexits.h` conventions so scripts driving the CLI
//! can tell a bad request from an unreachable store.

use super::RepositoryError;

/// Command line usage or input data error.
pub const EX_DATAERR: i32 = 65;
/// A required resource could not be found.
pub const EX_NOINPUT: i32 = 66;
/// Service unavailable.
pub const EX_UNAVAILABLE: i32 = 69;
/// Internal software error.
pub const EX_SOFTWARE: i32 = 70;
/// Can't create (user) output file; used for provisioning conflicts.
pub const EX_CANTCREAT: i32 = 73;
/// Temporary failure, the caller is invited to retry.
pub const EX_TEMPFAIL: i32 = 75;

/// Maps a [`RepositoryError`] to a process exit code.
///
/// - `Validation` -> 65
/// - `NotFound` -> 66
/// - `TableAlreadyExists`, `Provisioning`, `ActivationTimeout` -> 73
/// - `Throttled`, `Timeout` -> 75
/// - `StoreUnavailable` -> 69
/// - `QueryFailed`, `Serialization`, `InvalidData` -> 70
///
/// # Examples
///
/// ```
/// use usercomments_core::storage::{RepositoryError, repository_error_to_exit_code};
///
/// let error = RepositoryError::Validation("empty update".to_string());
/// assert_eq!(repository_error_to_exit_code(&error), 65);
/// ```
pub fn repository_error_to_exit_code(error: &RepositoryError) -> i32 {
    match error {
        RepositoryError::Validation(_) => EX_DATAERR,
        RepositoryError::NotFound { .. } => EX_NOINPUT,
        RepositoryError::TableAlreadyExists { .. }
        | RepositoryError::Provisioning(_)
        | RepositoryError::ActivationTimeout { .. } => EX_CANTCREAT,
        RepositoryError::Throttled(_) | RepositoryError::Timeout { .. } => EX_TEMPFAIL,
        RepositoryError::StoreUnavailable(_) => EX_UNAVAILABLE,
        RepositoryError::QueryFailed(_)
        | RepositoryError::Serialization(_)
        | RepositoryError::InvalidData(_) => EX_SOFTWARE,
    }
}
