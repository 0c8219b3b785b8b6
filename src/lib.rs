//! # revkv
//!
//! In-memory key/value store with optimistic concurrency control.
//!
//! Every successful write advances a single store-wide revision. A writer
//! that passes the revision it last observed as a CAS token succeeds only if
//! nothing has been written since; otherwise it gets the current revision
//! back and can retry. Listing walks a sorted key index in fixed-size pages,
//! so page boundaries are stable across unrelated writes.
//!
//! ## Quick Start
//!
//! ```
//! use revkv::prelude::*;
//!
//! let store = Store::builder().max_entries(100).page_size(10).open()?;
//!
//! // Blind upsert: no conflict check
//! let a = store.put("a", "1".into())?;
//!
//! // Guarded upsert: only if nothing changed since `a.revision`
//! store.compare_and_put("a", a.revision, "2".into())?;
//!
//! // Stale token is rejected with the current revision
//! let err = store.compare_and_put("a", a.revision, "3".into()).unwrap_err();
//! assert_eq!(err.current_revision(), Some(store.revision()));
//!
//! // Paginated listing
//! let page = store.list(Some("1"))?;
//! assert_eq!(page.value.entries.len(), 1);
//! # Ok::<(), revkv::Error>(())
//! ```
//!
//! ## Crates
//!
//! - `revkv-core` - data model, errors, configuration, payload validation
//! - `revkv-storage` - sorted key index and revisioned table
//! - `revkv-concurrency` - CAS tokens, pagination, the store service

#![warn(missing_docs)]
#![warn(clippy::all)]

mod database;

pub mod prelude;

// Re-export main entry points
pub use database::{Store, StoreBuilder};

pub use revkv_concurrency::{CasToken, KvService, Page, PageNumber};
pub use revkv_core::{
    Entry, EntryInput, Error, Result, Revision, Revisioned, StoreConfig, UpsertPayload,
};
