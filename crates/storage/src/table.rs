//! Revisioned table
//!
//! The single source of truth for entry data. Owns the per-entry revision
//! numbers and the [`SortedKeyIndex`]; every insert and delete updates the
//! index incrementally so that its key set always equals the map's.
//!
//! # Design
//!
//! - FxHashMap: O(1) point lookups, fast non-crypto hash
//! - SortedKeyIndex: ordered view for windowed listing
//! - Capacity is checked by the caller, never by `put`

use crate::index::SortedKeyIndex;
use revkv_core::{Entry, EntryInput};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry as Slot;

/// Key -> entry map with a sorted key index
#[derive(Debug, Default)]
pub struct RevisionedTable {
    entries: FxHashMap<String, Entry>,
    index: SortedKeyIndex,
}

impl RevisionedTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            index: SortedKeyIndex::new(),
        }
    }

    /// Create a table with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            index: SortedKeyIndex::with_capacity(capacity),
        }
    }

    /// Create or overwrite the entry for `key`
    ///
    /// The stored per-entry revision becomes the previous one plus one, or 1
    /// for a new key. Whatever the caller supplied is replaced wholesale.
    /// Returns the new per-entry revision.
    pub fn put(&mut self, key: &str, input: EntryInput) -> u64 {
        self.upsert(key, input).revision
    }

    /// Same as [`put`](Self::put), returning the stored entry
    pub fn upsert(&mut self, key: &str, input: EntryInput) -> &Entry {
        let revision = self.entries.get(key).map_or(0, |e| e.revision) + 1;
        let entry = input.into_entry(key, revision);

        self.index.insert(key);
        match self.entries.entry(key.to_owned()) {
            Slot::Occupied(mut slot) => {
                slot.insert(entry);
                slot.into_mut()
            }
            Slot::Vacant(slot) => slot.insert(entry),
        }
    }

    /// Get an entry by key
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Check if a key exists
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove an entry
    ///
    /// Returns the removed entry, or `None` if the key did not exist.
    pub fn delete(&mut self, key: &str) -> Option<Entry> {
        let removed = self.entries.remove(key)?;
        self.index.remove(key);
        Some(removed)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True iff no new key may be created under `max_entries`
    ///
    /// Gates creation only; overwriting an existing key is always allowed.
    pub fn is_at_capacity(&self, max_entries: usize) -> bool {
        self.len() >= max_entries
    }

    /// Entries whose keys occupy index positions `[start, end)`, ascending
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= len()`.
    pub fn window(&self, start: usize, end: usize) -> impl Iterator<Item = &Entry> + '_ {
        self.index
            .slice(start, end)
            .iter()
            .filter_map(|key| self.entries.get(key))
    }

    /// The sorted key index
    pub fn index(&self) -> &SortedKeyIndex {
        &self.index
    }
}
