//! Unified store builder for both directory layouts.
//!
//! Provides one API to create a directory with either layout while hiding
//! which concrete store sits behind it.
//!
//! ## Example
//!
//! ```rust
//! use contactkit::builder::{StoreBuilder, StoreLayout};
//! use contactkit::config::SearchFields;
//! use contactkit::entry::{Entry, Field};
//!
//! let mut store = StoreBuilder::new()
//!     .search_fields(SearchFields::NAMES.with(Field::PhoneNumber))
//!     .build(StoreLayout::Partitioned);
//! store.add(Entry::new("Hamza", "Bo", "+44 131 496 0571")).unwrap();
//! assert_eq!(store.find("+44").unwrap().len(), 1);
//! ```

use log::warn;

use crate::config::{SearchFields, StoreConfig};
use crate::entry::Entry;
use crate::error::{Result, StoreError};
use crate::store::flat::FlatStore;
use crate::store::partitioned::EntryStore;
use crate::traits::{Directory, ReadOnlyDirectory};

#[cfg(feature = "concurrency")]
use crate::store::concurrent::ConcurrentEntryStore;

/// Available store layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreLayout {
    /// Leading-letter buckets kept sorted on insert.
    #[default]
    Partitioned,
    /// Single vector, full scans, sort per enumeration.
    Flat,
}

/// Unified directory wrapper that provides a consistent API regardless of
/// layout.
#[derive(Debug)]
pub struct Store {
    inner: StoreInner,
}

#[derive(Debug)]
enum StoreInner {
    Partitioned(EntryStore),
    Flat(FlatStore),
}

impl Store {
    /// Returns the layout this store was built with.
    pub fn layout(&self) -> StoreLayout {
        match &self.inner {
            StoreInner::Partitioned(_) => StoreLayout::Partitioned,
            StoreInner::Flat(_) => StoreLayout::Flat,
        }
    }

    /// Returns the partitioned store, if that is the layout.
    pub fn as_partitioned(&self) -> Option<&EntryStore> {
        match &self.inner {
            StoreInner::Partitioned(store) => Some(store),
            StoreInner::Flat(_) => None,
        }
    }

    fn read(&self) -> &dyn ReadOnlyDirectory {
        match &self.inner {
            StoreInner::Partitioned(store) => store,
            StoreInner::Flat(store) => store,
        }
    }

    pub fn add(&mut self, entry: Entry) -> Result<bool> {
        match &mut self.inner {
            StoreInner::Partitioned(store) => store.add(entry),
            StoreInner::Flat(store) => store.add(entry),
        }
    }

    pub fn remove(&mut self, entry: &Entry) -> bool {
        match &mut self.inner {
            StoreInner::Partitioned(store) => store.remove(entry),
            StoreInner::Flat(store) => store.remove(entry),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.inner {
            StoreInner::Partitioned(store) => store.clear(),
            StoreInner::Flat(store) => store.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.read().contains(entry)
    }

    pub fn find(&self, query: &str) -> Result<Vec<&Entry>> {
        self.read().find(query)
    }

    pub fn sorted_by_first_name(&self) -> Vec<&Entry> {
        self.read().sorted_by_first_name()
    }

    pub fn sorted_by_last_name(&self) -> Vec<&Entry> {
        self.read().sorted_by_last_name()
    }
}

impl ReadOnlyDirectory for Store {
    fn len(&self) -> usize {
        Store::len(self)
    }

    fn contains(&self, entry: &Entry) -> bool {
        Store::contains(self, entry)
    }

    fn find(&self, query: &str) -> Result<Vec<&Entry>> {
        Store::find(self, query)
    }

    fn sorted_by_first_name(&self) -> Vec<&Entry> {
        Store::sorted_by_first_name(self)
    }

    fn sorted_by_last_name(&self) -> Vec<&Entry> {
        Store::sorted_by_last_name(self)
    }
}

impl Directory for Store {
    fn add(&mut self, entry: Entry) -> Result<bool> {
        Store::add(self, entry)
    }

    fn remove(&mut self, entry: &Entry) -> bool {
        Store::remove(self, entry)
    }

    fn clear(&mut self) {
        Store::clear(self)
    }
}

/// Builder for creating store instances.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    config: StoreConfig,
}

impl StoreBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fields `find` matches against.
    pub fn search_fields(mut self, fields: SearchFields) -> Self {
        self.config.search_fields = fields;
        self
    }

    /// Returns the configuration as validated for building.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidConfig`] when no search field is selected.
    pub fn try_config(&self) -> Result<StoreConfig> {
        if self.config.search_fields.is_empty() {
            return Err(StoreError::InvalidConfig(
                "at least one search field is required".into(),
            ));
        }
        Ok(self.config)
    }

    fn config_or_default(&self) -> StoreConfig {
        self.try_config().unwrap_or_else(|err| {
            warn!("{err}; falling back to default search fields");
            StoreConfig::default()
        })
    }

    /// Build a store with the specified layout.
    ///
    /// An empty search-field set falls back to the default set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use contactkit::builder::{StoreBuilder, StoreLayout};
    ///
    /// let indexed = StoreBuilder::new().build(StoreLayout::Partitioned);
    /// let flat = StoreBuilder::new().build(StoreLayout::Flat);
    /// assert_eq!(flat.layout(), StoreLayout::Flat);
    /// assert!(indexed.is_empty());
    /// ```
    pub fn build(&self, layout: StoreLayout) -> Store {
        Self::assemble(self.config_or_default(), layout)
    }

    /// Build a store with the specified layout, rejecting invalid
    /// configuration.
    pub fn try_build(&self, layout: StoreLayout) -> Result<Store> {
        Ok(Self::assemble(self.try_config()?, layout))
    }

    /// Build the partitioned store directly.
    pub fn build_partitioned(&self) -> EntryStore {
        EntryStore::with_config(self.config_or_default())
    }

    /// Build the flat baseline store directly.
    pub fn build_flat(&self) -> FlatStore {
        FlatStore::with_config(self.config_or_default())
    }

    /// Build a lock-wrapped partitioned store.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent(&self) -> ConcurrentEntryStore {
        ConcurrentEntryStore::with_config(self.config_or_default())
    }

    fn assemble(config: StoreConfig, layout: StoreLayout) -> Store {
        let inner = match layout {
            StoreLayout::Partitioned => StoreInner::Partitioned(EntryStore::with_config(config)),
            StoreLayout::Flat => StoreInner::Flat(FlatStore::with_config(config)),
        };
        Store { inner }
    }
}
