//! Shopping list data model.
//!
//! A [`ShoppingList`] is one document in a [`ListStore`](crate::backend::ListStore):
//! an immutable key, an ordered sequence of [`ListItem`]s, and the store-managed
//! version counter. The serialized form keeps the field names `id`, `list` and
//! `version`, with items as `{description, position, quantity, id}`.

mod errors;
mod sort;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use errors::ListError;
pub use sort::SortKey;

use crate::Result;

/// Mask keeping item ids inside the non-negative range of a signed 64-bit integer.
pub const ITEM_ID_MASK: u64 = i64::MAX as u64;

/// Identifier of an item within its list.
///
/// Ids are drawn at random from a 63-bit space when the item is created and never
/// change afterwards. Uniqueness within a list is probabilistic only: collisions
/// are not detected, and the odds of one are treated as negligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ItemId(u64);

impl ItemId {
    /// Generate a fresh random id.
    ///
    /// Takes the high 64 bits of a UUIDv4 and clears the sign bit.
    pub fn generate() -> Self {
        let (high, _) = Uuid::new_v4().as_u64_pair();
        ItemId(high & ITEM_ID_MASK)
    }

    /// The raw numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for ItemId {
    type Error = String;

    fn try_from(value: u64) -> std::result::Result<Self, Self::Error> {
        if value > ITEM_ID_MASK {
            return Err(format!("item id {value} is outside the 63-bit id space"));
        }
        Ok(ItemId(value))
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: u64 = s
            .parse()
            .map_err(|e| format!("invalid item id '{s}': {e}"))?;
        ItemId::try_from(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reject quantities below one.
pub fn validate_quantity(quantity: i32) -> Result<i32> {
    if quantity < 1 {
        return Err(ListError::InvalidQuantity { quantity }.into());
    }
    Ok(quantity)
}

/// A single entry in a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub description: String,
    /// List version at the time the item was added. Not a dense index.
    pub position: u64,
    pub quantity: i32,
    pub id: ItemId,
}

impl ListItem {
    /// Create an item with a freshly generated id.
    pub fn new(description: impl Into<String>, position: u64, quantity: i32) -> Self {
        Self {
            description: description.into(),
            position,
            quantity,
            id: ItemId::generate(),
        }
    }
}

/// A named, ordered collection of items stored as one versioned document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    /// The list's key in the store
    pub id: String,
    /// Items in insertion order
    #[serde(default)]
    pub list: Vec<ListItem>,
    /// Store-managed version, compared on every upsert
    #[serde(default)]
    pub version: u64,
}

impl ShoppingList {
    /// Creates an empty, never-stored list.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            list: Vec::new(),
            version: 0,
        }
    }

    /// Items in stored order.
    pub fn items(&self) -> &[ListItem] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Find the first item with the given id.
    pub fn item(&self, item_id: ItemId) -> Option<&ListItem> {
        self.list.iter().find(|item| item.id == item_id)
    }

    /// Append a new item positioned at the current version.
    ///
    /// The quantity is not validated here; callers go through [`validate_quantity`].
    pub fn push_item(&mut self, description: impl Into<String>, quantity: i32) -> ItemId {
        let item = ListItem::new(description, self.version, quantity);
        let id = item.id;
        self.list.push(item);
        id
    }

    /// Remove every item with the given id, returning how many were removed.
    pub fn remove_item(&mut self, item_id: ItemId) -> usize {
        let before = self.list.len();
        self.list.retain(|item| item.id != item_id);
        before - self.list.len()
    }

    /// Remove all items. The list itself stays.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Set the quantity of the first item with the given id.
    ///
    /// Returns `false` when no item matched.
    pub fn set_quantity(&mut self, item_id: ItemId, quantity: i32) -> bool {
        match self.list.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Copy of this list with its items ordered by `key`.
    pub fn sorted_by(&self, key: SortKey) -> ShoppingList {
        let mut sorted = self.clone();
        key.sort(&mut sorted.list);
        sorted
    }
}
