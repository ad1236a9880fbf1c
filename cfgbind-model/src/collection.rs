//! Keyed collection backing `array` fields.
//!
//! Many unrelated node types carry "a list of X keyed by X's primary key".
//! They embed a `KeyedCollection<X>` and delegate to it instead of each
//! re-implementing the bookkeeping.

use crate::ConfigNode;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
struct Entry<T> {
    key: Option<String>,
    item: T,
}

/// An insertion-ordered collection with optional per-entry keys.
///
/// Inserting an entry whose key is already present replaces the existing
/// item in place (later wins, position kept). Entries without a key are
/// always appended and never deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedCollection<T> {
    entries: Vec<Entry<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for KeyedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> KeyedCollection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts under `key`, replacing any entry with the same key.
    ///
    /// Returns the replaced item.
    pub fn insert_keyed(&mut self, key: Option<String>, item: T) -> Option<T> {
        match key {
            Some(key) => match self.index.get(&key) {
                Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].item, item)),
                None => {
                    self.index.insert(key.clone(), self.entries.len());
                    self.entries.push(Entry {
                        key: Some(key),
                        item,
                    });
                    None
                }
            },
            None => {
                self.entries.push(Entry { key: None, item });
                None
            }
        }
    }

    /// Appends without deduplication. Key lookups see the newest entry.
    pub fn push(&mut self, key: Option<String>, item: T) {
        if let Some(k) = &key {
            self.index.insert(k.clone(), self.entries.len());
        }
        self.entries.push(Entry { key, item });
    }

    /// Returns the entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.entries[pos].item)
    }

    /// Returns the entry stored under `key`, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.entries[pos].item),
            None => None,
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.item)
    }

    /// Iterates `(key, item)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (Option<&str>, &T)> {
        self.entries.iter().map(|e| (e.key.as_deref(), &e.item))
    }

    /// Iterates the keys of keyed entries in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| e.key.as_deref())
    }

    /// Converts every item, keeping keys and order.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<KeyedCollection<U>, E> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            entries.push(Entry {
                key: entry.key,
                item: f(entry.item)?,
            });
        }
        Ok(KeyedCollection {
            entries,
            index: self.index,
        })
    }
}

impl<T: ConfigNode> KeyedCollection<T> {
    /// Inserts a node under its own primary key.
    pub fn insert(&mut self, item: T) -> Option<T> {
        let key = item.primary_key();
        self.insert_keyed(key, item)
    }
}

impl<T: ConfigNode> FromIterator<T> for KeyedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.insert(item);
        }
        collection
    }
}
