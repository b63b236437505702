//! # Directory Trait Hierarchy
//!
//! Both store layouts expose the same in-process API through two traits:
//!
//! ```text
//!   ┌─────────────────────────────────────────────┐
//!   │             ReadOnlyDirectory               │
//!   │                                             │
//!   │  len(&) → usize                             │
//!   │  is_empty(&) → bool                         │
//!   │  contains(&, &Entry) → bool                 │
//!   │  find(&, &str) → Result<Vec<&Entry>>        │
//!   │  sorted_by_first_name(&) → Vec<&Entry>      │
//!   │  sorted_by_last_name(&) → Vec<&Entry>       │
//!   └──────────────────────┬──────────────────────┘
//!                          │
//!                          ▼
//!   ┌─────────────────────────────────────────────┐
//!   │                 Directory                   │
//!   │                                             │
//!   │  add(&mut, Entry) → Result<bool>            │
//!   │  remove(&mut, &Entry) → bool                │
//!   │  clear(&mut)                                │
//!   └─────────────────────────────────────────────┘
//! ```
//!
//! | Implementor   | `find` scope                    | Sorted enumeration        |
//! |---------------|---------------------------------|---------------------------|
//! | `EntryStore`  | Bucket of the query's first char| Concatenated buckets      |
//! | `FlatStore`   | Every entry                     | Copy + sort per call      |
//!
//! ## Example Usage
//!
//! ```
//! use contactkit::entry::Entry;
//! use contactkit::store::flat::FlatStore;
//! use contactkit::store::partitioned::EntryStore;
//! use contactkit::traits::{Directory, ReadOnlyDirectory};
//!
//! fn load<D: Directory>(dir: &mut D) {
//!     dir.add(Entry::new("Sally", "Graham", "+44 7700 900297")).unwrap();
//!     dir.add(Entry::new("Hamza", "Bo", "")).unwrap();
//! }
//!
//! let mut indexed = EntryStore::new();
//! let mut flat = FlatStore::new();
//! load(&mut indexed);
//! load(&mut flat);
//! assert_eq!(indexed.sorted_by_last_name(), flat.sorted_by_last_name());
//! ```

use crate::entry::Entry;
use crate::error::Result;

/// Read-only directory operations.
pub trait ReadOnlyDirectory {
    /// Number of distinct entries held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if an entry with identical fields is present.
    fn contains(&self, entry: &Entry) -> bool;

    /// Returns entries whose searched fields contain `query`, ignoring case.
    ///
    /// No matches is an empty `Vec`, not an error. An empty query fails with
    /// [`StoreError::InvalidQuery`](crate::error::StoreError::InvalidQuery).
    fn find(&self, query: &str) -> Result<Vec<&Entry>>;

    /// All entries ordered by first name (ties by last name).
    fn sorted_by_first_name(&self) -> Vec<&Entry>;

    /// All entries ordered by last name (ties by first name).
    fn sorted_by_last_name(&self) -> Vec<&Entry>;
}

/// Mutating directory operations.
pub trait Directory: ReadOnlyDirectory {
    /// Adds `entry`; returns `Ok(false)` if an identical entry already exists.
    ///
    /// Entries with an empty first or last name are rejected with
    /// [`StoreError::InvalidEntry`](crate::error::StoreError::InvalidEntry).
    fn add(&mut self, entry: Entry) -> Result<bool>;

    /// Removes the entry with identical fields; returns `false` if absent.
    fn remove(&mut self, entry: &Entry) -> bool;

    /// Removes every entry.
    fn clear(&mut self);

    /// Adds every entry, stopping at the first invalid one.
    ///
    /// Returns how many entries were newly inserted.
    fn add_all<I>(&mut self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = Entry>,
        Self: Sized,
    {
        let mut inserted = 0;
        for entry in entries {
            if self.add(entry)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
