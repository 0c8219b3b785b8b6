//! Core types for revkv
//!
//! This crate defines the types shared by every layer of the store:
//! - [`Entry`], [`EntryInput`]: stored records and the caller-supplied part of a write
//! - [`Revision`], [`Revisioned`]: the store-wide revision counter and results tagged with it
//! - [`Error`]: the canonical error type for all store operations
//! - [`StoreConfig`]: construction-time limits (capacity, page size)
//! - [`UpsertPayload`]: statically validated upsert request bodies

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod payload;
pub mod types;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use payload::UpsertPayload;
pub use types::{Entry, EntryInput, Revision, Revisioned};
