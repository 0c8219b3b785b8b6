//! Data model for the store
//!
//! - [`Revision`]: store-wide revision counter value, used as the CAS token
//! - [`Entry`]: a stored key/value record with its own per-entry revision
//! - [`EntryInput`]: what a caller supplies for a write
//! - [`Revisioned`]: a result paired with the global revision it was observed at

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-wide revision
///
/// A single monotonically non-decreasing counter describing the version of the
/// store as a whole. Starts at [`Revision::INITIAL`] and advances by one on
/// every successful write. Callers echo it back as a CAS token.
///
/// # Examples
///
/// ```
/// use revkv_core::Revision;
///
/// let r = Revision::INITIAL;
/// assert_eq!(r.as_u64(), 1);
/// assert_eq!(r.next().as_u64(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Revision of a freshly created store
    pub const INITIAL: Revision = Revision(1);

    /// Wrap a raw counter value
    pub const fn new(value: u64) -> Self {
        Revision(value)
    }

    /// Raw counter value
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// The revision that follows this one
    pub const fn next(self) -> Self {
        Revision(self.0 + 1)
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl From<u64> for Revision {
    fn from(value: u64) -> Self {
        Revision(value)
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored key/value record
///
/// `revision` is private to the entry: it counts how many times this key has
/// been written since it was last created. It is metadata only and never used
/// for CAS comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique, non-empty key
    pub key: String,
    /// Opaque payload
    pub value: String,
    /// Per-entry write count (1 after creation)
    pub revision: u64,
    /// When the entry was last written
    pub timestamp: DateTime<Utc>,
}

/// Caller-supplied part of a write
///
/// The key comes from the addressed resource, and the per-entry revision is
/// always computed by the table, so neither appears here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryInput {
    /// Payload to store
    pub value: String,
    /// Explicit write time; `None` means "now"
    pub timestamp: Option<DateTime<Utc>>,
}

impl EntryInput {
    /// Input with the given value and no explicit timestamp
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            timestamp: None,
        }
    }

    /// Set an explicit timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build the entry to store for `key` at per-entry revision `revision`
    pub fn into_entry(self, key: impl Into<String>, revision: u64) -> Entry {
        Entry {
            key: key.into(),
            value: self.value,
            revision,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        }
    }
}

impl From<&str> for EntryInput {
    fn from(value: &str) -> Self {
        EntryInput::new(value)
    }
}

impl From<String> for EntryInput {
    fn from(value: String) -> Self {
        EntryInput::new(value)
    }
}

/// A value paired with the global revision observed when it was produced
///
/// Every successful store operation returns one of these so the caller can
/// retry a guarded write with a fresh CAS token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revisioned<T> {
    /// The operation result
    pub value: T,
    /// Global revision at the time of the operation
    pub revision: Revision,
}

impl<T> Revisioned<T> {
    /// Pair a value with a revision
    pub fn new(value: T, revision: Revision) -> Self {
        Self { value, revision }
    }

    /// Transform the wrapped value, keeping the revision
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Revisioned<U> {
        Revisioned {
            value: f(self.value),
            revision: self.revision,
        }
    }
}
