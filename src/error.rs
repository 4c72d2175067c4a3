//! Custom error types for the library.
//!
//! This module defines the primary error type, `CamError`, for the whole
//! crate. Using the `thiserror` crate, it provides a centralized and
//! consistent way to handle the kinds of failures the core can hit:
//!
//! - **`NotFound`**: A filesystem path did not resolve. Kept separate from
//!   `Io` so callers can distinguish "the file is not there" from "the file
//!   is there but reading it failed".
//! - **`Io`**: Wraps `std::io::Error`, covering read/write failures on an
//!   otherwise valid resource (including descriptor reads).
//! - **`Enumeration`**: Transport discovery failed at the provider level.
//!   An empty port list is *not* an error; this fires only when the host
//!   provider itself could not be queried.
//! - **`IndexOutOfRange`**: A port-list index outside `[0, count)`.
//! - **`SerialFeatureDisabled`**: Serial enumeration was requested but the
//!   crate was built without the `serial` feature.
//!
//! Nothing here retries: retry policy for flaky enumeration or I/O belongs
//! to the orchestration layer above. Lookups that can legitimately find
//! nothing (`lookup_name`, `lookup_path`) return `Option` instead of an
//! error, since absence is an expected outcome rather than a fault.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for results using the library error type.
pub type CamResult<T> = std::result::Result<T, CamError>;

/// Errors surfaced by the file container and port catalog.
#[derive(Error, Debug)]
pub enum CamError {
    /// A filesystem path did not resolve to an existing file.
    #[error("file not found: {path}")]
    NotFound {
        /// The path that failed to resolve.
        path: PathBuf,
    },

    /// Read or write failure on an otherwise valid resource.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The host transport provider could not be queried.
    #[error("port enumeration failed: {0}")]
    Enumeration(String),

    /// A port-list index outside the loaded range.
    #[error("port index {index} out of range (list has {count} entries)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of entries currently loaded.
        count: usize,
    },

    /// Serial enumeration requested without the `serial` feature.
    #[error("Serial support not enabled. Rebuild with --features serial")]
    SerialFeatureDisabled,
}

impl CamError {
    /// Maps an I/O error on `path` to `NotFound` where that is what it
    /// means, keeping the two kinds distinguishable for callers.
    pub(crate) fn from_path_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            CamError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            CamError::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CamError::Enumeration("no providers".to_string());
        assert_eq!(err.to_string(), "port enumeration failed: no providers");
    }

    #[test]
    fn test_index_error_display() {
        let err = CamError::IndexOutOfRange { index: 4, count: 2 };
        assert_eq!(
            err.to_string(),
            "port index 4 out of range (list has 2 entries)"
        );
    }

    #[test]
    fn test_not_found_from_io() {
        let io = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err = CamError::from_path_io(std::path::Path::new("/no/such"), io);
        assert!(matches!(err, CamError::NotFound { .. }));

        let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = CamError::from_path_io(std::path::Path::new("/no/such"), io);
        assert!(matches!(err, CamError::Io(_)));
    }
}
