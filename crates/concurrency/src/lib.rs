//! Concurrency layer for revkv
//!
//! This crate implements optimistic concurrency control over the table:
//! - CasToken: the caller's snapshot of the global revision
//! - Page windowing over the sorted key index
//! - KvService: upserts (blind and guarded), fetch, delete, paginated listing
//!
//! A single lock per service makes each decide-then-act sequence atomic.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cas;
pub mod page;
pub mod service;

pub use cas::CasToken;
pub use page::{Page, PageNumber};
pub use service::KvService;
