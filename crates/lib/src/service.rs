//! List operations over a [`ListStore`].
//!
//! Every mutating operation is one read followed by at most one write. There is
//! no retry: if another writer updates the same list in between, the store's
//! version check fails the write and the [`VersionConflict`] error reaches the
//! caller unchanged.
//!
//! [`VersionConflict`]: crate::backend::BackendError::VersionConflict

use std::sync::Arc;

use handle_trait::Handle;

use crate::{
    Result,
    backend::ListStore,
    list::{ItemId, ShoppingList, SortKey, validate_quantity},
};

/// Service exposing the shopping list operations.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone, Handle)]
pub struct ListService {
    store: Arc<dyn ListStore>,
}

impl ListService {
    /// Create a service over a shared store.
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }

    /// Create a service that takes ownership of a boxed store.
    pub fn open(store: Box<dyn ListStore>) -> Self {
        Self {
            store: Arc::from(store),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn ListStore {
        self.store.as_ref()
    }

    /// Add an item to a list, creating the list if it doesn't exist.
    ///
    /// The new item's position is the list's version before this write.
    ///
    /// # Errors
    /// `InvalidQuantity` if `quantity` is below one; nothing is read or written.
    pub async fn add_item(
        &self,
        list_id: &str,
        description: &str,
        quantity: i32,
    ) -> Result<ShoppingList> {
        self.append_item(list_id, description, quantity)
            .await
            .inspect_err(|e| {
                tracing::debug!(list_id, description, error = %e, "Error adding item to list")
            })
    }

    /// Delete every item with `item_id` from a list.
    ///
    /// The list is written back even when nothing matched.
    ///
    /// # Returns
    /// The updated list, or `None` if the list doesn't exist.
    pub async fn delete_item(&self, list_id: &str, item_id: ItemId) -> Result<Option<ShoppingList>> {
        self.find_and_update(list_id, |list| {
            let removed = list.remove_item(item_id);
            tracing::debug!(list_id, %item_id, removed, "Deleting item");
            Ok(())
        })
        .await
        .inspect_err(|e| {
            tracing::debug!(list_id, %item_id, error = %e, "Error deleting item from list")
        })
    }

    /// Delete all items from a list. The emptied list is kept.
    ///
    /// # Returns
    /// The updated list, or `None` if the list doesn't exist.
    pub async fn delete_all(&self, list_id: &str) -> Result<Option<ShoppingList>> {
        self.find_and_update(list_id, |list| {
            list.clear();
            Ok(())
        })
        .await
        .inspect_err(|e| tracing::debug!(list_id, error = %e, "Error deleting all items from list"))
    }

    /// Set the quantity of the item with `item_id`.
    ///
    /// The list is written back even when no item matched.
    ///
    /// # Returns
    /// The updated list, or `None` if the list doesn't exist.
    ///
    /// # Errors
    /// `InvalidQuantity` if the list exists and `quantity` is below one; nothing is written.
    pub async fn update_quantity(
        &self,
        list_id: &str,
        item_id: ItemId,
        quantity: i32,
    ) -> Result<Option<ShoppingList>> {
        self.find_and_update(list_id, |list| {
            let quantity = validate_quantity(quantity)?;
            let updated = list.set_quantity(item_id, quantity);
            tracing::debug!(list_id, %item_id, quantity, updated, "Updating item quantity");
            Ok(())
        })
        .await
        .inspect_err(|e| {
            tracing::debug!(list_id, %item_id, quantity, error = %e, "Error updating item quantity")
        })
    }

    /// Fetch a list with its items sorted by the attribute named `sort_by`.
    ///
    /// The returned list keeps its stored `version`; it is not reset to 0.
    ///
    /// # Returns
    /// The sorted list, or `None` if the list doesn't exist.
    ///
    /// # Errors
    /// `UnknownSortKey` if the list exists and `sort_by` is not an item attribute.
    pub async fn get_list(&self, list_id: &str, sort_by: &str) -> Result<Option<ShoppingList>> {
        self.read_sorted(list_id, sort_by)
            .await
            .inspect_err(|e| {
                tracing::debug!(list_id, sort_by, error = %e, "Error getting items of list")
            })
    }

    /// Fetch a list with its items sorted by an already-resolved key.
    pub async fn get_list_sorted(
        &self,
        list_id: &str,
        key: SortKey,
    ) -> Result<Option<ShoppingList>> {
        Ok(self
            .store
            .get(list_id)
            .await?
            .map(|list| list.sorted_by(key)))
    }

    /// Keys of every stored list.
    pub async fn list_ids(&self) -> Result<Vec<String>> {
        self.store.list_ids().await
    }

    async fn append_item(
        &self,
        list_id: &str,
        description: &str,
        quantity: i32,
    ) -> Result<ShoppingList> {
        let quantity = validate_quantity(quantity)?;
        let mut list = self
            .store
            .get(list_id)
            .await?
            .unwrap_or_else(|| ShoppingList::new(list_id));
        let item_id = list.push_item(description, quantity);
        tracing::debug!(list_id, %item_id, position = list.version, "Adding item");
        self.store.upsert(list).await
    }

    async fn read_sorted(&self, list_id: &str, sort_by: &str) -> Result<Option<ShoppingList>> {
        let Some(list) = self.store.get(list_id).await? else {
            return Ok(None);
        };
        let key: SortKey = sort_by.parse()?;
        Ok(Some(list.sorted_by(key)))
    }

    /// Read a list, apply `update`, and write it back.
    ///
    /// Absent lists are neither updated nor written. An error from `update`
    /// aborts before the write.
    async fn find_and_update<F>(&self, list_id: &str, update: F) -> Result<Option<ShoppingList>>
    where
        F: FnOnce(&mut ShoppingList) -> Result<()> + Send,
    {
        let Some(mut list) = self.store.get(list_id).await? else {
            tracing::trace!(list_id, "List not found");
            return Ok(None);
        };
        update(&mut list)?;
        self.store.upsert(list).await.map(Some)
    }
}
