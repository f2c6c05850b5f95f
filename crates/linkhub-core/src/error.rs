//! Error kinds surfaced by the store
//!
//! Validation, lookup and authorization failures are kept apart from
//! storage failures so the HTTP layer can map each one to its own status.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by store operations
#[derive(Error, Debug)]
pub enum LinkHubError {
    /// A required field was missing or blank
    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    /// No link with this id
    #[error("Link not found: {id}")]
    NotFound { id: u64 },

    /// Admin secret did not match
    #[error("Admin password does not match")]
    Forbidden,

    /// The data file could not be written
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LinkHubError {
    /// True for errors caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, LinkHubError::Storage(_))
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, LinkHubError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_validation_display_names_field() {
        let err = LinkHubError::Validation { field: "title" };
        assert_eq!(err.to_string(), "Missing required field: title");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_storage_error_is_not_client_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: LinkHubError = StorageError::from_io(io_err, PathBuf::from("/x")).into();
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("Permission denied"));
    }
}
