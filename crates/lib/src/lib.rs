//!
//! Shoplist: named shopping lists over a versioned document store.
//!
//! ## Core Concepts
//!
//! * **Lists (`list::ShoppingList`)**: A named, ordered collection of items, stored as a single
//!   document keyed by the list id and carrying a store-managed version counter.
//! * **Items (`list::ListItem`)**: An entry in a list with a description, a positive quantity,
//!   a position derived from the list version at insertion time, and a random 63-bit id.
//! * **Stores (`backend::ListStore`)**: A pluggable persistence layer offering get-by-key and
//!   version-checked upsert-by-key.
//! * **Service (`service::ListService`)**: The read-modify-write operations callers use to add,
//!   remove, clear, re-quantify and fetch lists.

pub mod backend;
pub mod list;
pub mod service;

pub use list::{ItemId, ListItem, ShoppingList, SortKey};
pub use service::ListService;

/// Result type used throughout the Shoplist library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Shoplist library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured store errors from the backend module
    #[error(transparent)]
    Backend(backend::BackendError),

    /// Structured validation errors from the list module
    #[error(transparent)]
    List(list::ListError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Backend(_) => "backend",
            Error::List(_) => "list",
        }
    }

    /// Check if this error was caused by a bad caller-supplied argument.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::List(list_err) => list_err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error rejected a non-positive quantity.
    pub fn is_invalid_quantity(&self) -> bool {
        matches!(self, Error::List(list::ListError::InvalidQuantity { .. }))
    }

    /// Check if this error rejected an unknown sort attribute.
    pub fn is_unknown_sort_key(&self) -> bool {
        matches!(self, Error::List(list::ListError::UnknownSortKey { .. }))
    }

    /// Check if this error indicates a concurrent writer won the race.
    pub fn is_version_conflict(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_version_conflict(),
            _ => false,
        }
    }

    /// Check if this error came from the persistence layer.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Backend(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_io_error(),
            Error::List(_) => false,
        }
    }
}
