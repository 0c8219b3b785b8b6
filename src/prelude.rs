//! Convenient imports for revkv.
//!
//! ```
//! use revkv::prelude::*;
//!
//! let store = Store::open()?;
//! store.put("key", "value".into())?;
//! # Ok::<(), revkv::Error>(())
//! ```

// Main entry point
pub use crate::database::{Store, StoreBuilder};

// Error handling
pub use revkv_core::{Error, Result};

// Core types
pub use revkv_core::{Entry, EntryInput, Revision, Revisioned, StoreConfig};

// Listing
pub use revkv_concurrency::{Page, PageNumber};
