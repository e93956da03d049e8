//! Attribute sorting for list items.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{ListItem, errors::ListError};

/// An item attribute a list can be ordered by.
///
/// Parsed from the attribute name (`"description"`, `"position"`, `"quantity"`, `"id"`);
/// each key orders items ascending by that attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Lexical order of the item description
    Description,
    /// Insertion order
    #[default]
    Position,
    Quantity,
    Id,
}

impl SortKey {
    /// Every sortable attribute, in declaration order.
    pub const ALL: [SortKey; 4] = [
        SortKey::Description,
        SortKey::Position,
        SortKey::Quantity,
        SortKey::Id,
    ];

    /// The attribute name this key resolves from.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Description => "description",
            SortKey::Position => "position",
            SortKey::Quantity => "quantity",
            SortKey::Id => "id",
        }
    }

    /// Compare two items by this key's attribute.
    pub fn compare(&self, a: &ListItem, b: &ListItem) -> Ordering {
        match self {
            SortKey::Description => a.description.cmp(&b.description),
            SortKey::Position => a.position.cmp(&b.position),
            SortKey::Quantity => a.quantity.cmp(&b.quantity),
            SortKey::Id => a.id.cmp(&b.id),
        }
    }

    /// Sort items in place, ascending. Ties keep their prior relative order.
    pub fn sort(&self, items: &mut [ListItem]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

impl FromStr for SortKey {
    type Err = ListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ListError::UnknownSortKey { key: s.to_string() })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
