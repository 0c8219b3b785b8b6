//! Store configuration
//!
//! Limits fixed when a store is constructed. They never change for the
//! lifetime of the store.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default maximum number of live entries
pub const DEFAULT_MAX_ENTRIES: usize = 2;

/// Default number of entries per listing page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Construction-time store limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Maximum number of distinct live keys
    pub max_entries: usize,
    /// Entries per page when listing
    pub page_size: usize,
}

impl StoreConfig {
    /// Config with the given capacity and the default page size
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    /// Reject configurations the store cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidConfig("page_size must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
