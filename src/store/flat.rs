//! Flat entry store: one unsorted `Vec`, full scans, sort on demand.
//!
//! The simplest layout a contact directory can take, kept as the baseline the
//! partitioned [`EntryStore`](crate::store::partitioned::EntryStore) is
//! measured and checked against.
//!
//! | Operation             | Time        | Notes                                   |
//! |-----------------------|-------------|-----------------------------------------|
//! | `add`                 | O(n)        | Linear duplicate check                  |
//! | `remove`              | O(n)        | Order of remaining entries is kept      |
//! | `find`                | O(n · m)    | Every entry, any substring position     |
//! | `sorted_by_*`         | O(n log n)  | Copies and sorts on every call          |
//!
//! Validation and duplicate handling match `EntryStore`, and sorting uses the
//! same [`compare_by`] ordering, so both stores enumerate identically. Unlike
//! `EntryStore`, `find` matches the query anywhere in a field.

use log::{debug, trace};

use crate::config::StoreConfig;
use crate::entry::{Entry, Field, compare_by, fold_case};
use crate::error::{Result, StoreError};
use crate::traits::{Directory, ReadOnlyDirectory};

/// Contact directory backed by a single vector in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FlatStore {
    config: StoreConfig,
    entries: Vec<Entry>,
}

impl FlatStore {
    /// Creates an empty store searching first and last names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with `config`.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.entries.contains(entry)
    }

    /// Adds `entry`; `Ok(false)` if an identical entry is already present.
    pub fn add(&mut self, entry: Entry) -> Result<bool> {
        if let Some(field) = entry.missing_name() {
            debug!("rejecting entry with empty {field}: {entry:?}");
            return Err(StoreError::InvalidEntry { field });
        }
        if self.entries.contains(&entry) {
            trace!("ignoring duplicate entry {entry}");
            return Ok(false);
        }
        self.entries.push(entry);
        Ok(true)
    }

    /// Removes the entry with identical fields; `false` if absent.
    pub fn remove(&mut self, entry: &Entry) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            },
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns entries whose searched fields contain `query` anywhere,
    /// ignoring case, in insertion order.
    pub fn find(&self, query: &str) -> Result<Vec<&Entry>> {
        let folded = fold_case(query);
        if folded.is_empty() {
            debug!("rejecting empty query");
            return Err(StoreError::InvalidQuery);
        }
        let fields = self.config.search_fields;
        Ok(self
            .entries
            .iter()
            .filter(|entry| {
                fields
                    .iter()
                    .any(|field| fold_case(entry.field(field)).contains(&folded))
            })
            .collect())
    }

    /// Returns every entry sorted by `field`.
    pub fn sorted_by(&self, field: Field) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| compare_by(a, b, field));
        sorted
    }

    pub fn sorted_by_first_name(&self) -> Vec<&Entry> {
        self.sorted_by(Field::FirstName)
    }

    pub fn sorted_by_last_name(&self) -> Vec<&Entry> {
        self.sorted_by(Field::LastName)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl ReadOnlyDirectory for FlatStore {
    fn len(&self) -> usize {
        FlatStore::len(self)
    }

    fn contains(&self, entry: &Entry) -> bool {
        FlatStore::contains(self, entry)
    }

    fn find(&self, query: &str) -> Result<Vec<&Entry>> {
        FlatStore::find(self, query)
    }

    fn sorted_by_first_name(&self) -> Vec<&Entry> {
        FlatStore::sorted_by_first_name(self)
    }

    fn sorted_by_last_name(&self) -> Vec<&Entry> {
        FlatStore::sorted_by_last_name(self)
    }
}

impl Directory for FlatStore {
    fn add(&mut self, entry: Entry) -> Result<bool> {
        FlatStore::add(self, entry)
    }

    fn remove(&mut self, entry: &Entry) -> bool {
        FlatStore::remove(self, entry)
    }

    fn clear(&mut self) {
        FlatStore::clear(self)
    }
}

impl Extend<Entry> for FlatStore {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            if let Err(err) = self.add(entry) {
                debug!("extend skipped entry: {err}");
            }
        }
    }
}
