//! In-memory store implementation
//!
//! This module provides an in-memory implementation of the ListStore trait,
//! suitable for testing, development, or scenarios where data persistence
//! is handled by saving the whole state to a file.

mod persistence;

use std::{any::Any, collections::HashMap, path::Path};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Result,
    backend::{ListStore, next_version},
    list::ShoppingList,
};

/// A simple in-memory store using a `HashMap` keyed by list id.
///
/// It provides basic persistence capabilities via `save_to_file` and
/// `load_from_file`, serializing the map to JSON.
#[derive(Debug, Default)]
pub struct InMemory {
    /// Lists keyed by id, behind a read-write lock for concurrent access
    pub(crate) lists: RwLock<HashMap<String, ShoppingList>>,
}

impl InMemory {
    /// Creates a new, empty `InMemory` store.
    pub fn new() -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
        }
    }

    /// Number of lists currently stored.
    pub async fn len(&self) -> usize {
        self.lists.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.lists.read().await.is_empty()
    }

    /// Saves every stored list to a specified file as JSON.
    ///
    /// # Returns
    /// A `Result` indicating success or an I/O or serialization error.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persistence::save_to_file(self, path).await
    }

    /// Loads the store state from a specified JSON file.
    ///
    /// If the file does not exist, a new, empty `InMemory` store is returned.
    ///
    /// # Returns
    /// A `Result` containing the loaded store or an I/O or deserialization error.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        persistence::load_from_file(path).await
    }
}

#[async_trait]
impl ListStore for InMemory {
    async fn get(&self, id: &str) -> Result<Option<ShoppingList>> {
        Ok(self.lists.read().await.get(id).cloned())
    }

    async fn upsert(&self, mut list: ShoppingList) -> Result<ShoppingList> {
        // Hold the write lock across the version check so the compare and swap is atomic
        let mut lists = self.lists.write().await;
        let stored = lists.get(&list.id).map(|existing| existing.version);
        list.version = next_version(&list.id, list.version, stored)?;
        tracing::trace!(list_id = %list.id, version = list.version, "Stored list");
        lists.insert(list.id.clone(), list.clone());
        Ok(list)
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.lists.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
