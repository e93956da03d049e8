//! Backend implementations for Shoplist storage
//!
//! This module provides the core `ListStore` trait and the backend implementations
//! organized by category.
//!
//! The `ListStore` trait is a key-addressed document store holding one record per list.
//! It arbitrates concurrent writers through the per-record version counter: every
//! upsert must carry the version it read, and a mismatch is reported as
//! [`BackendError::VersionConflict`] rather than silently overwriting.

use std::any::Any;

use async_trait::async_trait;

use crate::{Result, list::ShoppingList};

// Category modules
pub mod database;
mod errors;

pub use errors::BackendError;

/// Store trait abstracting the underlying persistence for shopping lists.
///
/// All implementations must be `Send` and `Sync` to allow sharing across tasks,
/// and implement `Any` to allow for downcasting if needed.
#[async_trait]
pub trait ListStore: Send + Sync + Any {
    /// Retrieves a list by its key.
    ///
    /// # Returns
    /// `Ok(None)` if no list is stored under `id`.
    async fn get(&self, id: &str) -> Result<Option<ShoppingList>>;

    /// Inserts or replaces the list stored under `list.id`.
    ///
    /// `list.version` must equal the currently stored version, or 0 if the list has
    /// never been stored. On success the stored version is incremented by one and the
    /// saved record is returned.
    ///
    /// # Errors
    /// [`BackendError::VersionConflict`] if the stored version differs.
    async fn upsert(&self, list: ShoppingList) -> Result<ShoppingList>;

    /// Returns the keys of every stored list, sorted.
    async fn list_ids(&self) -> Result<Vec<String>>;

    /// Returns a reference to the store instance as a dynamic `Any` type.
    ///
    /// This allows for downcasting to a concrete store implementation if necessary,
    /// enabling backend-specific operations such as saving an in-memory store to disk.
    fn as_any(&self) -> &dyn Any;
}

/// Check a write's version against the stored one and compute the next version.
///
/// `stored` is `None` when the list does not exist yet, which only a version-0
/// record may create.
pub(crate) fn next_version(list_id: &str, written: u64, stored: Option<u64>) -> Result<u64> {
    if written != stored.unwrap_or(0) {
        return Err(BackendError::VersionConflict {
            list_id: list_id.to_string(),
            expected: written,
            actual: stored,
        }
        .into());
    }
    Ok(written + 1)
}
