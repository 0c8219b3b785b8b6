//! Sorted key index
//!
//! A flat, strictly ascending `Vec<String>`. Positions are found by binary
//! search; the insertion or removal itself shifts the tail, which is O(n) but
//! keeps the slice contiguous so a page is a plain sub-slice.

/// Ascending, duplicate-free set of live keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedKeyIndex {
    keys: Vec<String>,
}

impl SortedKeyIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Create an index with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
        }
    }

    /// Insert a key at its sorted position
    ///
    /// Idempotent: returns `false` and leaves the index untouched if the key
    /// is already present.
    pub fn insert(&mut self, key: &str) -> bool {
        match self.position(key) {
            Ok(_) => false,
            Err(pos) => {
                self.keys.insert(pos, key.to_owned());
                true
            }
        }
    }

    /// Remove a key
    ///
    /// Returns `false` if the key was not present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.position(key) {
            Ok(pos) => {
                self.keys.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Keys in positions `[start, end)`
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= len()`. Callers clamp the window first.
    pub fn slice(&self, start: usize, end: usize) -> &[String] {
        &self.keys[start..end]
    }

    /// Check membership
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_ok()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys in ascending order
    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    /// Iterate keys in ascending order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.keys.iter()
    }

    #[inline]
    fn position(&self, key: &str) -> Result<usize, usize> {
        self.keys.binary_search_by(|probe| probe.as_str().cmp(key))
    }
}

impl<'a> IntoIterator for &'a SortedKeyIndex {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
