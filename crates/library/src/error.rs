//! Library Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Leaf variants carry the actionable io category; `Scan`
//! and `TrackList` are context frames naming the operation that aborted.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Path does not exist
    #[display("path not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied by the filesystem
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// The work folder scan aborted
    #[display("failed to scan for work folders")]
    Scan,
    /// The track list could not be read from disk
    #[display("failed to get track list from disk")]
    TrackList,
}

impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Map an io error onto an actionable category, keeping the failing path.
    pub(crate) fn from_io(err: IoError, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }

    /// Returns `true` if retrying might succeed. Advisory only: nothing in
    /// this crate retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
