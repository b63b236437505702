//! Partitioned index: entries grouped by the leading character of one field,
//! each group kept in sorted order.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                  BucketIndex (field = LastName)                       │
//! │                                                                      │
//! │   buckets: BTreeMap<char, BTreeSet<Indexed>>                         │
//! │                                                                      │
//! │   'B' ──► [ (Bo, Hamza) Hamza Bo ] ─ [ (Bond, Phoenix) Phoenix Bond ] │
//! │   'G' ──► [ (Graham, Sally) Sally Graham ]                           │
//! │   'P' ──► [ (Parks, Aaran) Aaran Parks ] ─ [ (Paul, Adriana) ... ]   │
//! │   'R' ──► [ (RIDDLE, JAYDEN) Jayden Riddle ]                         │
//! │                                                                      │
//! │   Indexed = (SortKey, Entry), ordered by bucket key, raw primary,    │
//! │   raw secondary, then the entry itself.                              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bucket keys are the first character of the folded field, so walking the
//! buckets in ascending key order yields every entry in `SortKey` order with
//! no re-sort.
//!
//! ## Operations
//!
//! | Operation  | Time                    | Notes                                 |
//! |------------|-------------------------|---------------------------------------|
//! | `insert`   | O(log b + log n_b)      | Duplicate entries are a no-op         |
//! | `remove`   | O(log b + log n_b)      | Absent entries are a no-op            |
//! | `contains` | O(log b + log n_b)      |                                       |
//! | `find`     | O(n_b · m)              | Scans only the query's bucket         |
//! | `iter`     | O(n)                    | Already sorted                        |
//!
//! `b` is the number of buckets, `n_b` the size of the bucket touched, `m` the
//! cost of one substring test.
//!
//! ## Search Scope
//!
//! `find` only scans the bucket keyed by the query's leading character. A
//! query matches text that starts with the same character and contains the
//! query; a query that occurs mid-field behind a different leading character
//! ("ra" in "Graham") is never looked at.
//!
//! ## Example Usage
//!
//! ```
//! use contactkit::ds::{BucketIndex, IndexInsert};
//! use contactkit::entry::{Entry, Field};
//!
//! let mut index = BucketIndex::new(Field::LastName);
//! assert_eq!(index.insert(Entry::new("Sally", "Graham", "")), IndexInsert::Inserted);
//! assert_eq!(index.insert(Entry::new("Sally", "Graham", "")), IndexInsert::Duplicate);
//! assert_eq!(index.insert(Entry::new("Hamza", "Bo", "")), IndexInsert::Inserted);
//!
//! let found: Vec<_> = index.find("GRAH").collect();
//! assert_eq!(found.len(), 1);
//! assert_eq!(index.keys().collect::<Vec<_>>(), vec!['B', 'G']);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::entry::{Entry, Field, SortKey};
use crate::error::InvariantError;

/// Result of [`BucketIndex::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexInsert {
    /// The entry was added.
    Inserted,
    /// An identical entry was already present; nothing changed.
    Duplicate,
    /// The indexed field is empty, so the entry has no bucket.
    Unkeyed,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Indexed {
    key: SortKey,
    entry: Entry,
}

impl Indexed {
    fn new(entry: Entry, field: Field) -> Self {
        Self {
            key: SortKey::new(&entry, field),
            entry,
        }
    }
}

/// Entries of one field partitioned by leading character, each bucket sorted.
#[derive(Debug, Clone)]
pub struct BucketIndex {
    field: Field,
    buckets: BTreeMap<char, BTreeSet<Indexed>>,
    len: usize,
}

impl BucketIndex {
    /// Creates an empty index over `field`.
    pub fn new(field: Field) -> Self {
        Self {
            field,
            buckets: BTreeMap::new(),
            len: 0,
        }
    }

    /// Returns the field this index partitions on.
    #[inline]
    pub fn field(&self) -> Field {
        self.field
    }

    /// Returns the number of indexed entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no entries are indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of non-empty buckets.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of entries in the bucket for `key`.
    pub fn bucket_len(&self, key: char) -> usize {
        self.buckets.get(&key).map_or(0, BTreeSet::len)
    }

    /// Iterates bucket keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.buckets.keys().copied()
    }

    /// Inserts `entry` into the bucket of its field.
    pub fn insert(&mut self, entry: Entry) -> IndexInsert {
        let indexed = Indexed::new(entry, self.field);
        let Some(key) = indexed.key.bucket() else {
            return IndexInsert::Unkeyed;
        };
        if self.buckets.entry(key).or_default().insert(indexed) {
            self.len += 1;
            IndexInsert::Inserted
        } else {
            IndexInsert::Duplicate
        }
    }

    /// Removes `entry`; returns `true` if it was present.
    pub fn remove(&mut self, entry: &Entry) -> bool {
        let probe = Indexed::new(entry.clone(), self.field);
        let Some(key) = probe.key.bucket() else {
            return false;
        };
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        if !bucket.remove(&probe) {
            return false;
        }
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.len -= 1;
        true
    }

    /// Returns `true` if `entry` is indexed.
    pub fn contains(&self, entry: &Entry) -> bool {
        let probe = Indexed::new(entry.clone(), self.field);
        probe
            .key
            .bucket()
            .and_then(|key| self.buckets.get(&key))
            .is_some_and(|bucket| bucket.contains(&probe))
    }

    /// Iterates entries whose folded field contains `folded_query`, scanning
    /// only the bucket keyed by the query's first character.
    ///
    /// `folded_query` must already be case-folded; an empty query yields
    /// nothing.
    pub fn find<'a>(&'a self, folded_query: &str) -> impl Iterator<Item = &'a Entry> {
        folded_query
            .chars()
            .next()
            .and_then(|key| self.buckets.get(&key))
            .into_iter()
            .flatten()
            .filter(move |indexed| indexed.key.folded().contains(folded_query))
            .map(|indexed| &indexed.entry)
    }

    /// Number of entries [`find`](Self::find) inspects for `folded_query`.
    pub fn candidates(&self, folded_query: &str) -> usize {
        folded_query
            .chars()
            .next()
            .map_or(0, |key| self.bucket_len(key))
    }

    /// Iterates every entry in ascending order of the indexed field.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.buckets
            .values()
            .flatten()
            .map(|indexed| &indexed.entry)
    }

    /// Iterates the entries of the bucket for `key` in sorted order.
    pub fn bucket(&self, key: char) -> impl Iterator<Item = &Entry> + '_ {
        self.buckets
            .get(&key)
            .into_iter()
            .flatten()
            .map(|indexed| &indexed.entry)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Validates bucket placement, ordering across buckets, and the cached
    /// length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut count = 0usize;
        let mut prev: Option<&Indexed> = None;
        for (&key, bucket) in &self.buckets {
            if bucket.is_empty() {
                return Err(InvariantError::new(format!(
                    "{} index: empty bucket {key:?} retained",
                    self.field
                )));
            }
            for indexed in bucket {
                if indexed.key.bucket() != Some(key) {
                    return Err(InvariantError::new(format!(
                        "{} index: entry {} filed under {key:?}",
                        self.field, indexed.entry
                    )));
                }
                if indexed.key != SortKey::new(&indexed.entry, self.field) {
                    return Err(InvariantError::new(format!(
                        "{} index: stale sort key for {}",
                        self.field, indexed.entry
                    )));
                }
                if prev.is_some_and(|p| p >= indexed) {
                    return Err(InvariantError::new(format!(
                        "{} index: {} out of order",
                        self.field, indexed.entry
                    )));
                }
                prev = Some(indexed);
                count += 1;
            }
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "{} index: len {} but {count} entries in buckets",
                self.field, self.len
            )));
        }
        Ok(())
    }
}
