//! # Items
//!
//! Items are identified by name. They lie on exactly one cell floor until the
//! player picks them up, after which they live in the owned set for good.

use crate::config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A named item. Two items are the same item iff their names match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
}

impl Item {
    /// Creates an item with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The key that opens the exit.
    pub fn exit_key() -> Self {
        Self::new(config::EXIT_KEY_NAME)
    }

    /// The castle map.
    pub fn map() -> Self {
        Self::new(config::MAP_ITEM_NAME)
    }

    /// Whether picking this item up reveals the castle layout.
    pub fn is_map(&self) -> bool {
        self.name == config::MAP_ITEM_NAME
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Set of items with unique membership. Ordered so listings are stable.
pub type ItemSet = BTreeSet<Item>;

/// Joins item names with commas, e.g. for lock labels.
pub fn join_items(items: &ItemSet) -> String {
    items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
