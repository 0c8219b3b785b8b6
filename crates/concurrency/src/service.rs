//! Key/value service with compare-and-swap writes
//!
//! The public operation surface of the store. Owns the table, the global
//! revision counter and the capacity limit.
//!
//! ## Write Sequence
//!
//! ```text
//! 1. Acquire the store lock
//! 2. IF guarded: reject a new key when at capacity
//! 3. IF guarded: parse the token, compare with the global revision
//! 4. IF blind: reject a new key when at capacity
//! 5. table.put() - bump the per-entry revision, update the index
//! 6. Advance the global revision by one
//! 7. Release the lock, return entry + revision
//! ```
//!
//! Deletes do not advance the global revision.

use crate::cas::CasToken;
use crate::page::{Page, PageNumber};
use parking_lot::Mutex;
use revkv_core::{Entry, EntryInput, Error, Result, Revision, Revisioned, StoreConfig};
use revkv_storage::RevisionedTable;

/// State guarded by the store lock
#[derive(Debug)]
struct StoreState {
    table: RevisionedTable,
    revision: Revision,
}

impl StoreState {
    fn ensure_room_for(&self, key: &str, max_entries: usize) -> Result<()> {
        if !self.table.contains(key) && self.table.is_at_capacity(max_entries) {
            return Err(Error::MaxCapacityReached { max_entries });
        }
        Ok(())
    }

    fn apply(&mut self, key: &str, input: EntryInput) -> Revisioned<Entry> {
        let entry = self.table.upsert(key, input).clone();
        self.revision = self.revision.next();
        Revisioned::new(entry, self.revision)
    }
}

/// Concurrency-controlled key/value store
///
/// Every operation holds one mutex for its full duration, so the existence
/// check, capacity check, token comparison, write and counter update of an
/// upsert form a single critical section. Operations are totally ordered by
/// lock acquisition; of two conflicting guarded writes exactly one wins and
/// the other observes the revision to retry against.
///
/// # Example
///
/// ```
/// use revkv_concurrency::KvService;
/// use revkv_core::{Revision, StoreConfig};
///
/// let service = KvService::new(StoreConfig::with_max_entries(2)).unwrap();
/// let written = service.put("a", "1".into()).unwrap();
/// assert_eq!(written.revision, Revision::new(2));
///
/// let stale = service.compare_and_put("a", Revision::new(1), "2".into());
/// assert!(stale.unwrap_err().is_conflict());
/// ```
#[derive(Debug)]
pub struct KvService {
    config: StoreConfig,
    state: Mutex<StoreState>,
}

impl KvService {
    /// Create an empty store at [`Revision::INITIAL`]
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: Mutex::new(StoreState {
                table: RevisionedTable::new(),
                revision: Revision::INITIAL,
            }),
        })
    }

    /// Limits this store was built with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current global revision
    pub fn revision(&self) -> Revision {
        self.state.lock().revision
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.state.lock().table.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.state.lock().table.is_empty()
    }

    /// All live keys in ascending order
    pub fn keys(&self) -> Vec<String> {
        self.state.lock().table.index().as_slice().to_vec()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Upsert with a raw CAS token as received from a caller
    ///
    /// An absent, empty or `"0"` token makes this a blind upsert. Any other
    /// token makes it guarded: a new key is rejected at capacity before the
    /// token is even parsed, then the token must parse as an integer and
    /// equal the current global revision.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKey`] for an empty key
    /// - [`Error::MaxCapacityReached`] when creating a key in a full store
    /// - [`Error::InvalidCasToken`] for a non-integer token
    /// - [`Error::RevisionMismatch`] when the token is stale
    pub fn upsert(
        &self,
        key: &str,
        cas: Option<&str>,
        input: EntryInput,
    ) -> Result<Revisioned<Entry>> {
        validate_key(key)?;
        match CasToken::parse(cas) {
            Ok(CasToken::Unset) => self.put(key, input),
            token => {
                let mut state = self.state.lock();
                state.ensure_room_for(key, self.config.max_entries)?;
                token?.check(state.revision)?;
                Ok(state.apply(key, input))
            }
        }
    }

    /// Blind upsert: write without conflict checking
    ///
    /// Updating an existing key always succeeds; creating one fails with
    /// [`Error::MaxCapacityReached`] when the store is full.
    pub fn put(&self, key: &str, input: EntryInput) -> Result<Revisioned<Entry>> {
        validate_key(key)?;
        let mut state = self.state.lock();
        state.ensure_room_for(key, self.config.max_entries)?;
        Ok(state.apply(key, input))
    }

    /// Guarded upsert: write only if the global revision equals `expected`
    ///
    /// On mismatch the store is left unchanged and the error carries the
    /// current revision.
    pub fn compare_and_put(
        &self,
        key: &str,
        expected: Revision,
        input: EntryInput,
    ) -> Result<Revisioned<Entry>> {
        validate_key(key)?;
        let mut state = self.state.lock();
        state.ensure_room_for(key, self.config.max_entries)?;
        CasToken::from(expected).check(state.revision)?;
        Ok(state.apply(key, input))
    }

    // =========================================================================
    // Reads and deletes
    // =========================================================================

    /// Fetch an entry
    pub fn get(&self, key: &str) -> Result<Revisioned<Entry>> {
        let state = self.state.lock();
        state
            .table
            .get(key)
            .cloned()
            .map(|entry| Revisioned::new(entry, state.revision))
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    /// Delete an entry, returning it as it was just before removal
    ///
    /// Deleting an absent key, including one already deleted, fails with
    /// [`Error::KeyNotFound`]. The global revision is not advanced.
    pub fn delete(&self, key: &str) -> Result<Revisioned<Entry>> {
        let mut state = self.state.lock();
        let removed = state
            .table
            .delete(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))?;
        Ok(Revisioned::new(removed, state.revision))
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// List a page from a raw page number; absent means page 1
    pub fn list(&self, page: Option<&str>) -> Result<Revisioned<Page>> {
        self.page(PageNumber::parse(page)?)
    }

    /// List one page of entries in ascending key order
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPage`] when the page starts past the last entry. Page 1
    /// of an empty store is an empty page, not an error.
    pub fn page(&self, number: PageNumber) -> Result<Revisioned<Page>> {
        let state = self.state.lock();
        let total = state.table.len();
        let range = number.window(self.config.page_size, total)?;

        let entries = state.table.window(range.start, range.end).cloned().collect();
        Ok(Revisioned::new(
            Page {
                number,
                entries,
                total,
                page_size: self.config.page_size,
            },
            state.revision,
        ))
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidKey("key must not be empty".into()));
    }
    Ok(())
}
