//! Key-based row selection.

use std::collections::BTreeMap;

/// Selected rows, keyed by row identity.
///
/// Iteration follows key order so consumers see a deterministic sequence
/// regardless of the order rows were selected in.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<K: Ord, R> {
    selected: BTreeMap<K, R>,
}

impl<K: Ord, R> Default for Selection<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, R> Selection<K, R> {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self {
            selected: BTreeMap::new(),
        }
    }

    /// Check if a key is selected.
    pub fn contains(&self, key: &K) -> bool {
        self.selected.contains_key(key)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Add a row. Returns false if the key was already selected.
    ///
    /// An already selected key keeps its first row.
    pub fn insert(&mut self, key: K, row: R) -> bool {
        if self.selected.contains_key(&key) {
            return false;
        }
        self.selected.insert(key, row);
        true
    }

    /// Remove a row by key, returning it if it was selected.
    pub fn remove(&mut self, key: &K) -> Option<R> {
        self.selected.remove(key)
    }

    /// Clear all selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.selected.keys()
    }

    /// Selected rows in key order.
    pub fn rows(&self) -> impl Iterator<Item = &R> {
        self.selected.values()
    }
}

impl<K: Ord, R> FromIterator<(K, R)> for Selection<K, R> {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (key, row) in iter {
            selection.insert(key, row);
        }
        selection
    }
}
