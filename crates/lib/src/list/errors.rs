//! Validation error types for list operations.
//!
//! These cover caller-supplied arguments the list model refuses before any
//! store write happens.

use thiserror::Error;

/// Errors raised while validating list operation arguments.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// Quantity was zero or negative.
    #[error("Invalid quantity {quantity}: must be at least 1")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// Sort attribute does not name a field of a list item.
    #[error("Unknown sort key '{key}': expected one of description, position, quantity, id")]
    UnknownSortKey {
        /// The rejected attribute name
        key: String,
    },
}

impl ListError {
    /// Check if this error was caused by a bad caller-supplied argument.
    ///
    /// Every current variant is an argument error; the helper exists so callers
    /// don't have to match on a non-exhaustive enum.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ListError::InvalidQuantity { .. } | ListError::UnknownSortKey { .. }
        )
    }
}

impl From<ListError> for crate::Error {
    fn from(err: ListError) -> Self {
        crate::Error::List(err)
    }
}
