//! Thread-safe wrapper around [`EntryStore`].
//!
//! `EntryStore` carries no locking of its own. `ConcurrentEntryStore` puts it
//! behind a `parking_lot::RwLock`: `add`, `remove`, and `clear` take the write
//! lock, lookups and enumeration share the read lock. Results are cloned out
//! so no borrow outlives the guard; the `*_with` variants run a closure under
//! the read lock instead.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use contactkit::entry::Entry;
//! use contactkit::store::concurrent::ConcurrentEntryStore;
//!
//! let store = Arc::new(ConcurrentEntryStore::new());
//! let writer = {
//!     let store = Arc::clone(&store);
//!     thread::spawn(move || store.add(Entry::new("Sally", "Graham", "")).unwrap())
//! };
//! writer.join().unwrap();
//! assert_eq!(store.find("graham").unwrap().len(), 1);
//! ```

use parking_lot::RwLock;

use crate::config::StoreConfig;
use crate::entry::Entry;
use crate::error::{InvariantError, Result};
use crate::store::partitioned::EntryStore;

#[cfg(feature = "metrics")]
use crate::metrics::snapshot::StoreMetricsSnapshot;

/// [`EntryStore`] behind a reader-writer lock.
#[derive(Debug, Default)]
pub struct ConcurrentEntryStore {
    inner: RwLock<EntryStore>,
}

impl ConcurrentEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self::from_store(EntryStore::with_config(config))
    }

    /// Wraps an existing store.
    pub fn from_store(store: EntryStore) -> Self {
        Self {
            inner: RwLock::new(store),
        }
    }

    /// Unwraps the inner store.
    pub fn into_inner(self) -> EntryStore {
        self.inner.into_inner()
    }

    pub fn add(&self, entry: Entry) -> Result<bool> {
        let mut store = self.inner.write();
        store.add(entry)
    }

    pub fn remove(&self, entry: &Entry) -> bool {
        let mut store = self.inner.write();
        store.remove(entry)
    }

    pub fn clear(&self) {
        let mut store = self.inner.write();
        store.clear();
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        let store = self.inner.read();
        store.contains(entry)
    }

    pub fn len(&self) -> usize {
        let store = self.inner.read();
        store.len()
    }

    pub fn is_empty(&self) -> bool {
        let store = self.inner.read();
        store.is_empty()
    }

    /// Cloned results of [`EntryStore::find`].
    pub fn find(&self, query: &str) -> Result<Vec<Entry>> {
        self.find_with(query, |found| found.iter().map(|&e| e.clone()).collect())
    }

    /// Runs `f` on the borrowed results of [`EntryStore::find`] under the read
    /// lock.
    pub fn find_with<R>(&self, query: &str, f: impl FnOnce(&[&Entry]) -> R) -> Result<R> {
        let store = self.inner.read();
        let found = store.find(query)?;
        Ok(f(&found))
    }

    pub fn sorted_by_first_name(&self) -> Vec<Entry> {
        let store = self.inner.read();
        store.sorted_by_first_name().into_iter().cloned().collect()
    }

    pub fn sorted_by_last_name(&self) -> Vec<Entry> {
        let store = self.inner.read();
        store.sorted_by_last_name().into_iter().cloned().collect()
    }

    /// Runs `f` on the store under the read lock.
    pub fn read_with<R>(&self, f: impl FnOnce(&EntryStore) -> R) -> R {
        let store = self.inner.read();
        f(&store)
    }

    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        let store = self.inner.read();
        store.check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> StoreMetricsSnapshot {
        let store = self.inner.read();
        store.metrics_snapshot()
    }
}
