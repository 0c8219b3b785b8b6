//! Error types for revkv
//!
//! Every failure path of the store returns one of these as a value. Nothing in
//! the core crates panics, logs, or retries on the caller's behalf: retrying a
//! guarded write with a fresh revision is the caller's job.
//!
//! ## Error Codes (Canonical)
//!
//! | Code | Description |
//! |------|-------------|
//! | MaxCapacityReached | New key rejected because the store is full |
//! | RevisionMismatch | CAS token does not equal the current global revision |
//! | InvalidCasToken | CAS token is not an integer |
//! | KeyNotFound | Fetch or delete of an absent key |
//! | InvalidPage | Page number unparsable, non-positive, or past the end |
//! | UnknownField | Upsert payload has a field outside the fixed set |
//! | MalformedPayload | Upsert payload is not a JSON object of the right shape |
//! | InvalidKey | Key is empty |
//! | InvalidConfig | Store configuration rejected at construction |

use crate::types::Revision;
use thiserror::Error;

/// All revkv errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Attempted creation of a new key while the store is full
    #[error("max capacity reached: store holds {max_entries} entries")]
    MaxCapacityReached {
        /// Configured capacity
        max_entries: usize,
    },

    /// CAS token does not match the current global revision
    #[error("revision mismatch: token {expected} does not match current revision {current}")]
    RevisionMismatch {
        /// Token the caller supplied
        expected: i64,
        /// Current global revision, to retry against
        current: Revision,
    },

    /// CAS token present but not an integer
    #[error("invalid cas token: {0:?}")]
    InvalidCasToken(String),

    /// Key does not exist
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Page number unusable
    #[error("invalid page: {0}")]
    InvalidPage(String),

    /// Upsert payload field outside the accepted set
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Upsert payload could not be decoded
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Key is not acceptable
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Configuration rejected
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for revkv operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Canonical error code, stable across releases
    pub fn code(&self) -> &'static str {
        match self {
            Error::MaxCapacityReached { .. } => "MaxCapacityReached",
            Error::RevisionMismatch { .. } => "RevisionMismatch",
            Error::InvalidCasToken(_) => "InvalidCasToken",
            Error::KeyNotFound(_) => "KeyNotFound",
            Error::InvalidPage(_) => "InvalidPage",
            Error::UnknownField(_) => "UnknownField",
            Error::MalformedPayload(_) => "MalformedPayload",
            Error::InvalidKey(_) => "InvalidKey",
            Error::InvalidConfig(_) => "InvalidConfig",
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only a revision mismatch may succeed on retry with a fresh token.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RevisionMismatch { .. })
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound(_))
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::RevisionMismatch { .. })
    }

    /// Current global revision carried by a mismatch, if any
    pub fn current_revision(&self) -> Option<Revision> {
        match self {
            Error::RevisionMismatch { current, .. } => Some(*current),
            _ => None,
        }
    }
}
