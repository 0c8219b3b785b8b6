//! Storage layer for revkv
//!
//! This crate implements the in-memory table behind the store:
//! - SortedKeyIndex: ascending, duplicate-free key order for stable pagination
//! - RevisionedTable: key -> entry map with per-entry revisions and the index
//!
//! Neither type locks. The owning service serializes every access behind a
//! single mutex, so the existence check and the write of one upsert can never
//! interleave with another caller's.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod table;

pub use index::SortedKeyIndex;
pub use table::RevisionedTable;
