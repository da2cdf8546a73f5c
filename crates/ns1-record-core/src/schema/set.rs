// # Schema Set
//
// Unordered collection whose membership is decided by a deterministic hash of
// each element. Two sets holding the same elements compare equal and iterate
// in the same order no matter how they were built, which is what the host's
// diff engine relies on.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::collections::btree_map;

use super::hash::SetHash;

/// An element that can live in a [`SchemaSet`]
pub trait SetElement {
    /// Stable hash identifying the element
    fn set_hash(&self) -> SetHash;
}

/// Hash-keyed set
///
/// Inserting an element whose hash is already present replaces the stored
/// element. Iteration is in ascending hash order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSet<T> {
    items: BTreeMap<SetHash, T>,
}

impl<T> Default for SchemaSet<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<T> SchemaSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in hash order
    pub fn iter(&self) -> btree_map::Values<'_, SetHash, T> {
        self.items.values()
    }

    /// Element hashes in ascending order
    pub fn hashes(&self) -> impl Iterator<Item = SetHash> + '_ {
        self.items.keys().copied()
    }
}

impl<T: SetElement> SchemaSet<T> {
    /// Add an element; returns `false` if an element with the same hash was replaced
    pub fn insert(&mut self, item: T) -> bool {
        self.items.insert(item.set_hash(), item).is_none()
    }

    /// Whether an element with the same hash is present
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains_key(&item.set_hash())
    }
}

impl<T: SetElement> FromIterator<T> for SchemaSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<T: SetElement> Extend<T> for SchemaSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a SchemaSet<T> {
    type Item = &'a T;
    type IntoIter = btree_map::Values<'a, SetHash, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}

impl<T> IntoIterator for SchemaSet<T> {
    type Item = T;
    type IntoIter = btree_map::IntoValues<SetHash, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_values()
    }
}

impl<T: Serialize> Serialize for SchemaSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.values())
    }
}

impl<'de, T> Deserialize<'de> for SchemaSet<T>
where
    T: Deserialize<'de> + SetElement,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
