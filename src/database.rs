//! Main entry point for revkv.
//!
//! This module provides the `Store` handle and its builder.

use revkv_concurrency::KvService;
use revkv_core::{Result, StoreConfig};
use std::ops::Deref;
use std::sync::Arc;

/// A revkv store.
///
/// Cheap to clone: every clone shares the same table, lock and revision
/// counter. Dereferences to [`KvService`] for all operations.
///
/// # Example
///
/// ```
/// use revkv::prelude::*;
///
/// let store = Store::builder().max_entries(10).open()?;
///
/// let written = store.put("name", "Alice".into())?;
/// assert_eq!(written.revision, Revision::new(2));
///
/// // Guarded write with the revision we just observed
/// store.compare_and_put("name", written.revision, "Bob".into())?;
/// assert_eq!(store.get("name")?.value.value, "Bob");
/// # Ok::<(), revkv::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<KvService>,
}

impl Store {
    /// Open a store with default limits.
    pub fn open() -> Result<Self> {
        Self::builder().open()
    }

    /// Open a store with the given limits.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        Self::builder().config(config).open()
    }

    /// Create a builder for store configuration.
    ///
    /// # Example
    ///
    /// ```
    /// let store = revkv::Store::builder()
    ///     .max_entries(1_000)
    ///     .page_size(25)
    ///     .open()
    ///     .unwrap();
    /// assert_eq!(store.config().page_size, 25);
    /// ```
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// The shared service behind this handle.
    pub fn service(&self) -> &Arc<KvService> {
        &self.inner
    }
}

impl Deref for Store {
    type Target = KvService;

    fn deref(&self) -> &KvService {
        &self.inner
    }
}

/// Builder for store configuration.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    config: StoreConfig,
}

impl StoreBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
        }
    }

    /// Replace all settings at once.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Maximum number of distinct live keys.
    ///
    /// Updates to existing keys are never limited.
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.config.max_entries = max_entries;
        self
    }

    /// Entries per page when listing. Must be at least 1.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Open the store.
    ///
    /// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
    /// settings cannot be honored.
    pub fn open(self) -> Result<Store> {
        let service = KvService::new(self.config)?;
        Ok(Store {
            inner: Arc::new(service),
        })
    }
}
