//! Store error types for the Shoplist backend.
//!
//! This module defines structured error types for list store operations,
//! providing better error context and type safety compared to string-based errors.

use thiserror::Error;

/// Errors that can occur during list store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Field additions/changes require a major version bump
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    /// The written record's version did not match the stored version.
    ///
    /// Another writer updated the list between this caller's read and write.
    #[error("Version conflict on list '{list_id}': expected version {expected}, found {actual:?}")]
    VersionConflict {
        /// The key of the list being written
        list_id: String,
        /// The version carried by the record being written
        expected: u64,
        /// The version currently stored, or `None` if the list does not exist
        actual: Option<u64>,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Persisted data could not be interpreted.
    #[error("Store state inconsistency: {reason}")]
    StateInconsistency {
        /// Description of the inconsistency
        reason: String,
    },

    /// SQL database error.
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("SQL error: {reason}")]
    SqlxError {
        /// Description including context
        reason: String,
        /// The underlying sqlx error, when there is one
        #[source]
        source: Option<sqlx::Error>,
    },
}

impl BackendError {
    /// Check if this error indicates a concurrent writer won the race.
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, BackendError::VersionConflict { .. })
    }

    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            BackendError::FileIo { .. }
                | BackendError::SerializationFailed { .. }
                | BackendError::DeserializationFailed { .. }
        )
    }

    /// Check if this error indicates a data integrity issue.
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, BackendError::StateInconsistency { .. })
    }

    /// Get the list key if this error is about a specific list.
    pub fn list_id(&self) -> Option<&str> {
        match self {
            BackendError::VersionConflict { list_id, .. } => Some(list_id),
            _ => None,
        }
    }
}

// Conversion from BackendError to the main Error type
impl From<BackendError> for crate::Error {
    fn from(err: BackendError) -> Self {
        crate::Error::Backend(err)
    }
}
