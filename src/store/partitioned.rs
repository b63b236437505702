//! Partitioned entry store: the contact directory core.
//!
//! Entries live in two independent [`BucketIndex`]es, one keyed on the folded
//! first character of the first name and one on the last name. Lookups touch
//! one bucket per searched field, and sorted enumeration walks the buckets of
//! one index in key order with no re-sort.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                               EntryStore                                 │
//! │                                                                          │
//! │   by_first_name: BucketIndex(FirstName)   by_last_name: BucketIndex(Last)│
//! │     'A' ─► Aaran Parks, Adriana Paul        'B' ─► Hamza Bo, Phoenix Bond│
//! │     'H' ─► Hamza Bo                         'G' ─► Sally Graham          │
//! │     'J' ─► Jayden Riddle                    'P' ─► Aaran Parks, ...      │
//! │     'P' ─► Phoenix Bond                     'R' ─► Jayden Riddle         │
//! │     'S' ─► Sally Graham                                                  │
//! │                                                                          │
//! │   by_phone: Option<BucketIndex(PhoneNumber)>   only when phone numbers   │
//! │                                                are searched              │
//! └──────────────────────────────────────────────────────────────────────────┘
//!
//! find("grah"):
//!   1. fold query            → "GRAH", key 'G'
//!   2. by_first_name['G']    → scan, keep entries whose folded first name
//!                              contains "GRAH"
//!   3. by_last_name['G']     → same on last name
//!   4. de-duplicate          → an entry matched by both indexes appears once
//! ```
//!
//! ## Invariants
//!
//! - Every entry is in exactly one bucket of each name index, keyed by its own
//!   field; add and remove update both indexes or neither.
//! - Entries with an empty first or last name are rejected up front.
//! - The phone index (when present) holds exactly the entries with a non-empty
//!   phone number.
//!
//! `check_invariants()` verifies all of the above.
//!
//! ## Search Scope
//!
//! Only the bucket keyed by the query's leading character is scanned. A query
//! that appears mid-field behind a different leading character ("ham" in
//! "Graham") does not match; use [`FlatStore`](crate::store::flat::FlatStore)
//! when full substring search matters more than bounded scan cost.
//!
//! ## Thread Safety
//!
//! Not synchronized. Wrap in a lock owned by the caller, or enable the
//! `concurrency` feature and use
//! [`ConcurrentEntryStore`](crate::store::concurrent::ConcurrentEntryStore).
//!
//! ## Example Usage
//!
//! ```
//! use contactkit::entry::Entry;
//! use contactkit::store::partitioned::EntryStore;
//!
//! let mut store = EntryStore::new();
//! store.add(Entry::new("Sally", "Graham", "+44 7700 900297")).unwrap();
//! store.add(Entry::new("Hamza", "Bo", "+44 131 496 0571")).unwrap();
//!
//! // Duplicate insert is a no-op
//! assert!(!store.add(Entry::new("Hamza", "Bo", "+44 131 496 0571")).unwrap());
//! assert_eq!(store.len(), 2);
//!
//! let found = store.find("grah").unwrap();
//! assert_eq!(found[0].first_name, "Sally");
//!
//! let by_last: Vec<_> = store
//!     .sorted_by_last_name()
//!     .into_iter()
//!     .map(|e| e.last_name.as_str())
//!     .collect();
//! assert_eq!(by_last, vec!["Bo", "Graham"]);
//! ```

use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::config::StoreConfig;
use crate::ds::bucket_index::{BucketIndex, IndexInsert};
use crate::entry::{Entry, Field, fold_case};
use crate::error::{InvariantError, Result, StoreError};
use crate::traits::{Directory, ReadOnlyDirectory};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::StoreMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::StoreMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, StoreMetricsReadRecorder, StoreMetricsRecorder,
};

/// In-memory contact directory indexed by the leading letter of each name.
#[derive(Debug)]
pub struct EntryStore {
    config: StoreConfig,
    by_first_name: BucketIndex,
    by_last_name: BucketIndex,
    by_phone: Option<BucketIndex>,
    #[cfg(feature = "metrics")]
    metrics: StoreMetrics,
}

impl EntryStore {
    /// Creates an empty store searching first and last names.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with `config`.
    ///
    /// An empty search-field set is accepted here and makes every `find`
    /// return nothing; [`StoreBuilder`](crate::builder::StoreBuilder) rejects it.
    pub fn with_config(config: StoreConfig) -> Self {
        let by_phone = config
            .search_fields
            .contains(Field::PhoneNumber)
            .then(|| BucketIndex::new(Field::PhoneNumber));
        Self {
            config,
            by_first_name: BucketIndex::new(Field::FirstName),
            by_last_name: BucketIndex::new(Field::LastName),
            by_phone,
            #[cfg(feature = "metrics")]
            metrics: StoreMetrics::default(),
        }
    }

    /// Returns the store configuration.
    #[inline]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the number of distinct entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_first_name.len()
    }

    /// Returns `true` if the store holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_first_name.is_empty()
    }

    /// Returns `true` if an entry with identical fields is present.
    pub fn contains(&self, entry: &Entry) -> bool {
        self.by_first_name.contains(entry)
    }

    /// Adds `entry` to every index.
    ///
    /// Returns `Ok(false)` without changing anything when an identical entry is
    /// already present.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidEntry`] when the first or last name is empty.
    pub fn add(&mut self, entry: Entry) -> Result<bool> {
        #[cfg(feature = "metrics")]
        self.metrics.record_add_call();

        if let Some(field) = entry.missing_name() {
            #[cfg(feature = "metrics")]
            self.metrics.record_add_rejected();
            debug!("rejecting entry with empty {field}: {entry:?}");
            return Err(StoreError::InvalidEntry { field });
        }

        match self.by_first_name.insert(entry.clone()) {
            IndexInsert::Inserted => {},
            IndexInsert::Duplicate => {
                #[cfg(feature = "metrics")]
                self.metrics.record_add_duplicate();
                trace!("ignoring duplicate entry {entry}");
                return Ok(false);
            },
            IndexInsert::Unkeyed => {
                return Err(StoreError::InvalidEntry {
                    field: Field::FirstName,
                });
            },
        }

        if let Some(by_phone) = &mut self.by_phone {
            // Empty phone numbers are simply not indexed here.
            by_phone.insert(entry.clone());
        }
        trace!("added entry {entry}");
        self.by_last_name.insert(entry);

        #[cfg(feature = "metrics")]
        self.metrics.record_add_new();
        Ok(true)
    }

    /// Removes the entry with identical fields from every index.
    ///
    /// Returns `false` if no such entry is present.
    pub fn remove(&mut self, entry: &Entry) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        if !self.by_first_name.remove(entry) {
            trace!("remove of absent entry {entry}");
            return false;
        }
        self.by_last_name.remove(entry);
        if let Some(by_phone) = &mut self.by_phone {
            by_phone.remove(entry);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        trace!("removed entry {entry}");
        true
    }

    /// Removes every entry. Configuration and metrics are kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.by_first_name.clear();
        self.by_last_name.clear();
        if let Some(by_phone) = &mut self.by_phone {
            by_phone.clear();
        }
    }

    /// Returns entries whose searched fields contain `query`, ignoring case.
    ///
    /// Each searched field's index is scanned only in the bucket keyed by the
    /// query's leading character. Results are in scan order (first-name
    /// bucket, then last-name bucket, then phone bucket) with duplicates
    /// collapsed.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidQuery`] when `query` is empty.
    pub fn find(&self, query: &str) -> Result<Vec<&Entry>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_find_call();

        let folded = fold_case(query);
        if folded.is_empty() {
            #[cfg(feature = "metrics")]
            self.metrics.record_find_rejected();
            debug!("rejecting empty query");
            return Err(StoreError::InvalidQuery);
        }

        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        for index in self.searched_indexes() {
            #[cfg(feature = "metrics")]
            self.metrics
                .record_find_scan_steps(index.candidates(&folded) as u64);

            for entry in index.find(&folded) {
                if seen.insert(entry) {
                    found.push(entry);
                }
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_find_matches(found.len() as u64);
        Ok(found)
    }

    /// Returns every entry ordered by first name, ties broken by last name.
    pub fn sorted_by_first_name(&self) -> Vec<&Entry> {
        #[cfg(feature = "metrics")]
        self.metrics.record_sorted_call();

        self.by_first_name.iter().collect()
    }

    /// Returns every entry ordered by last name, ties broken by first name.
    pub fn sorted_by_last_name(&self) -> Vec<&Entry> {
        #[cfg(feature = "metrics")]
        self.metrics.record_sorted_call();

        self.by_last_name.iter().collect()
    }

    /// Iterates entries in first-name order without collecting.
    pub fn iter_by_first_name(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.by_first_name.iter()
    }

    /// Iterates entries in last-name order without collecting.
    pub fn iter_by_last_name(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.by_last_name.iter()
    }

    /// Returns the index partitioned on `field`, if the store keeps one.
    ///
    /// Name indexes always exist; the phone index only when phone numbers are
    /// searched.
    pub fn index(&self, field: Field) -> Option<&BucketIndex> {
        match field {
            Field::FirstName => Some(&self.by_first_name),
            Field::LastName => Some(&self.by_last_name),
            Field::PhoneNumber => self.by_phone.as_ref(),
        }
    }

    /// Bucket keys of the index on `field`, ascending.
    pub fn bucket_keys(&self, field: Field) -> Vec<char> {
        self.index(field)
            .map(|index| index.keys().collect())
            .unwrap_or_default()
    }

    /// Number of entries in the `field` index bucket for `key`.
    pub fn bucket_len(&self, field: Field, key: char) -> usize {
        self.index(field).map_or(0, |index| index.bucket_len(key))
    }

    fn searched_indexes(&self) -> impl Iterator<Item = &BucketIndex> + '_ {
        self.config
            .search_fields
            .iter()
            .filter_map(move |field| self.index(field))
    }

    /// Validates every index and their agreement with each other.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        self.by_first_name.check_invariants()?;
        self.by_last_name.check_invariants()?;

        if self.by_first_name.len() != self.by_last_name.len() {
            return Err(InvariantError::new(format!(
                "first-name index holds {} entries, last-name index {}",
                self.by_first_name.len(),
                self.by_last_name.len()
            )));
        }
        for entry in self.by_first_name.iter() {
            if entry.missing_name().is_some() {
                return Err(InvariantError::new(format!(
                    "entry {entry:?} has an empty name"
                )));
            }
            if !self.by_last_name.contains(entry) {
                return Err(InvariantError::new(format!(
                    "entry {entry} missing from last-name index"
                )));
            }
        }

        match &self.by_phone {
            Some(by_phone) => {
                by_phone.check_invariants()?;
                let with_phone = self
                    .by_first_name
                    .iter()
                    .filter(|e| !e.phone_number.is_empty());
                let mut expected = 0usize;
                for entry in with_phone {
                    expected += 1;
                    if !by_phone.contains(entry) {
                        return Err(InvariantError::new(format!(
                            "entry {entry} missing from phone index"
                        )));
                    }
                }
                if expected != by_phone.len() {
                    return Err(InvariantError::new(format!(
                        "phone index holds {} entries, expected {expected}",
                        by_phone.len()
                    )));
                }
            },
            None if self.config.search_fields.contains(Field::PhoneNumber) => {
                return Err(InvariantError::new(
                    "phone numbers are searched but no phone index exists",
                ));
            },
            None => {},
        }
        Ok(())
    }

    /// Returns a snapshot of operation counters plus current gauges.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> StoreMetricsSnapshot {
        StoreMetricsSnapshot {
            store_len: self.len(),
            first_name_buckets: self.by_first_name.bucket_count(),
            last_name_buckets: self.by_last_name.bucket_count(),
            phone_buckets: self.by_phone.as_ref().map_or(0, BucketIndex::bucket_count),
            ..self.metrics.snapshot()
        }
    }

    /// Zeroes every operation counter.
    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadOnlyDirectory for EntryStore {
    fn len(&self) -> usize {
        EntryStore::len(self)
    }

    fn contains(&self, entry: &Entry) -> bool {
        EntryStore::contains(self, entry)
    }

    fn find(&self, query: &str) -> Result<Vec<&Entry>> {
        EntryStore::find(self, query)
    }

    fn sorted_by_first_name(&self) -> Vec<&Entry> {
        EntryStore::sorted_by_first_name(self)
    }

    fn sorted_by_last_name(&self) -> Vec<&Entry> {
        EntryStore::sorted_by_last_name(self)
    }
}

impl Directory for EntryStore {
    fn add(&mut self, entry: Entry) -> Result<bool> {
        EntryStore::add(self, entry)
    }

    fn remove(&mut self, entry: &Entry) -> bool {
        EntryStore::remove(self, entry)
    }

    fn clear(&mut self) {
        EntryStore::clear(self)
    }
}

impl Extend<Entry> for EntryStore {
    /// Adds every valid entry; invalid entries are skipped.
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            if let Err(err) = self.add(entry) {
                debug!("extend skipped entry: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchFields;

    const PEOPLE: [(&str, &str, &str); 6] = [
        ("Sally", "Graham", "+44 7700 900297"),
        ("Phoenix", "Bond", "0161 496 0311"),
        ("Aaran", "Parks", ""),
        ("Jayden", "Riddle", "+44 131 496 0609"),
        ("Adriana", "Paul", "(739) 391-4868"),
        ("Hamza", "Bo", "+44 131 496 0571"),
    ];

    fn sample_store() -> EntryStore {
        let mut store = EntryStore::new();
        for (first, last, phone) in PEOPLE {
            store.add(Entry::new(first, last, phone)).unwrap();
        }
        store
    }

    fn firsts(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.first_name.clone()).collect()
    }

    fn lasts(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.last_name.clone()).collect()
    }

    // ==============================================
    // Add
    // ==============================================

    #[test]
    fn add_single_entry() {
        let mut store = EntryStore::new();
        assert!(store.add(Entry::new("Sally", "Graham", "+44 7700 900297")).unwrap());

        let results = store.sorted_by_first_name();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].first_name, "Sally");
        assert_eq!(results[0].last_name, "Graham");
        assert_eq!(results[0].phone_number, "+44 7700 900297");
        store.check_invariants().unwrap();
    }

    #[test]
    fn add_duplicate_is_noop() {
        let mut store = sample_store();
        assert!(!store.add(Entry::new("Aaran", "Parks", "")).unwrap());
        assert_eq!(store.len(), 6);
        assert_eq!(store.bucket_len(Field::FirstName, 'A'), 2);
        store.check_invariants().unwrap();
    }

    #[test]
    fn add_same_name_different_phone() {
        let mut store = EntryStore::new();
        assert!(store.add(Entry::new("Billy", "Billy", "1")).unwrap());
        assert!(store.add(Entry::new("Billy", "Billy", "2")).unwrap());
        assert_eq!(store.len(), 2);
        assert_eq!(store.find("billy").unwrap().len(), 2);
        store.check_invariants().unwrap();
    }

    #[test]
    fn add_rejects_empty_names() {
        let mut store = EntryStore::new();
        assert_eq!(
            store.add(Entry::new("", "Graham", "")),
            Err(StoreError::InvalidEntry {
                field: Field::FirstName
            })
        );
        assert_eq!(
            store.add(Entry::new("Sally", "", "")),
            Err(StoreError::InvalidEntry {
                field: Field::LastName
            })
        );
        assert!(store.is_empty());
        store.check_invariants().unwrap();
    }

    #[test]
    fn add_accepts_empty_phone() {
        let mut store = EntryStore::new();
        assert!(store.add(Entry::new("Aaran", "Parks", "")).unwrap());
        assert!(store.contains(&Entry::new("Aaran", "Parks", "")));
    }

    #[test]
    fn add_all_counts_new_entries() {
        let mut store = EntryStore::new();
        let inserted = store
            .add_all(vec![
                Entry::new("Sally", "Graham", ""),
                Entry::new("Sally", "Graham", ""),
                Entry::new("Hamza", "Bo", ""),
            ])
            .unwrap();
        assert_eq!(inserted, 2);
    }

    #[test]
    fn add_all_stops_at_invalid_entry() {
        let mut store = EntryStore::new();
        let err = store
            .add_all(vec![
                Entry::new("Sally", "Graham", ""),
                Entry::new("Hamza", "", ""),
                Entry::new("Phoenix", "Bond", ""),
            ])
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidEntry { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn extend_skips_invalid_entries() {
        let mut store = EntryStore::new();
        store.extend(vec![
            Entry::new("Sally", "Graham", ""),
            Entry::new("", "Nobody", ""),
            Entry::new("Hamza", "Bo", ""),
        ]);
        assert_eq!(store.len(), 2);
    }

    // ==============================================
    // Sorted enumeration
    // ==============================================

    #[test]
    fn sorted_by_first_name_matches_expected_order() {
        let store = sample_store();
        assert_eq!(
            firsts(&store.sorted_by_first_name()),
            vec!["Aaran", "Adriana", "Hamza", "Jayden", "Phoenix", "Sally"]
        );
    }

    #[test]
    fn sorted_by_last_name_matches_expected_order() {
        let store = sample_store();
        assert_eq!(
            lasts(&store.sorted_by_last_name()),
            vec!["Bo", "Bond", "Graham", "Parks", "Paul", "Riddle"]
        );
    }

    #[test]
    fn sorted_breaks_ties_on_other_name() {
        let mut store = EntryStore::new();
        store.add(Entry::new("Sam", "Young", "")).unwrap();
        store.add(Entry::new("Sam", "Adams", "")).unwrap();
        store.add(Entry::new("Sam", "Adams", "2")).unwrap();
        let sorted = store.sorted_by_first_name();
        assert_eq!(lasts(&sorted), vec!["Adams", "Adams", "Young"]);
        assert_eq!(sorted[0].phone_number, "");
        assert_eq!(sorted[1].phone_number, "2");
    }

    #[test]
    fn sorted_uses_codepoint_order_within_bucket() {
        let mut store = EntryStore::new();
        store.add(Entry::new("Mcallister", "Bea", "")).unwrap();
        store.add(Entry::new("McDonald", "Ann", "")).unwrap();
        store.add(Entry::new("Sam", "DeVito", "")).unwrap();
        store.add(Entry::new("Tom", "Deaver", "")).unwrap();
        assert_eq!(
            firsts(&store.sorted_by_first_name()),
            vec!["McDonald", "Mcallister", "Sam", "Tom"]
        );
        assert_eq!(
            lasts(&store.sorted_by_last_name()),
            vec!["Ann", "Bea", "DeVito", "Deaver"]
        );
        store.check_invariants().unwrap();
    }

    #[test]
    fn sorted_ignores_case_of_leading_letter() {
        let mut store = EntryStore::new();
        store.add(Entry::new("bob", "Zed", "")).unwrap();
        store.add(Entry::new("Carl", "Abbot", "")).unwrap();
        store.add(Entry::new("Alice", "Young", "")).unwrap();
        assert_eq!(
            firsts(&store.sorted_by_first_name()),
            vec!["Alice", "bob", "Carl"]
        );
    }

    #[test]
    fn iterators_agree_with_sorted_vectors() {
        let store = sample_store();
        assert_eq!(
            store.iter_by_first_name().collect::<Vec<_>>(),
            store.sorted_by_first_name()
        );
        assert_eq!(
            store.iter_by_last_name().collect::<Vec<_>>(),
            store.sorted_by_last_name()
        );
    }

    // ==============================================
    // Find
    // ==============================================

    #[test]
    fn find_exact_last_name() {
        let store = sample_store();
        let results = store.find("Graham").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(*results[0], Entry::new("Sally", "Graham", "+44 7700 900297"));
    }

    #[test]
    fn find_multiple_people() {
        let mut store = sample_store();
        store.add(Entry::new("Graham", "Johnson", "")).unwrap();
        let results = store.find("Graham").unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].first_name, "Graham");
        assert_eq!(results[0].last_name, "Johnson");
        assert_eq!(results[1].first_name, "Sally");
        assert_eq!(results[1].last_name, "Graham");
    }

    #[test]
    fn find_partial_match() {
        let store = sample_store();
        let results = store.find("Grah").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].last_name, "Graham");
    }

    #[test]
    fn find_is_case_insensitive() {
        let store = sample_store();
        let upper = store.find("AARAN").unwrap();
        let lower = store.find("aaran").unwrap();
        assert_eq!(upper.len(), 1);
        assert_eq!(upper, lower);
    }

    #[test]
    fn find_collapses_match_from_both_indexes() {
        let mut store = EntryStore::new();
        store.add(Entry::new("Billy", "Billy", "")).unwrap();
        let results = store.find("bil").unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn find_no_match_is_empty() {
        let store = sample_store();
        assert!(store.find("Zebedee").unwrap().is_empty());
    }

    #[test]
    fn find_does_not_look_past_leading_letter() {
        let store = sample_store();
        // "ham" occurs inside "Graham", whose bucket is 'G'
        assert!(store.find("ham").unwrap().iter().all(|e| e.last_name != "Graham"));
        // but finds Hamza through bucket 'H'
        assert_eq!(firsts(&store.find("ham").unwrap()), vec!["Hamza"]);
    }

    #[test]
    fn find_empty_query_is_rejected() {
        let store = sample_store();
        assert_eq!(store.find(""), Err(StoreError::InvalidQuery));
    }

    #[test]
    fn find_ignores_phone_by_default() {
        let store = sample_store();
        assert!(store.find("+44").unwrap().is_empty());
        assert!(store.index(Field::PhoneNumber).is_none());
    }

    #[test]
    fn find_phone_when_configured() {
        let mut store = EntryStore::with_config(StoreConfig::new(SearchFields::ALL));
        for (first, last, phone) in PEOPLE {
            store.add(Entry::new(first, last, phone)).unwrap();
        }
        let results = store.find("+44 131").unwrap();
        assert_eq!(firsts(&results), vec!["Hamza", "Jayden"]);
        assert_eq!(store.index(Field::PhoneNumber).unwrap().len(), 5);
        store.check_invariants().unwrap();
    }

    #[test]
    fn find_last_name_only() {
        let config = StoreConfig::new(SearchFields::EMPTY.with(Field::LastName));
        let mut store = EntryStore::with_config(config);
        store.add(Entry::new("Graham", "Johnson", "")).unwrap();
        store.add(Entry::new("Sally", "Graham", "")).unwrap();
        assert_eq!(firsts(&store.find("graham").unwrap()), vec!["Sally"]);
        // sorted enumeration still covers both names
        assert_eq!(store.sorted_by_first_name().len(), 2);
    }

    // ==============================================
    // Remove
    // ==============================================

    #[test]
    fn remove_then_find_is_empty() {
        let mut store = sample_store();
        let sally = Entry::new("Sally", "Graham", "+44 7700 900297");
        assert!(store.remove(&sally));
        assert!(store.find("Graham").unwrap().is_empty());
        assert_eq!(store.sorted_by_first_name().len(), 5);
        assert_eq!(store.sorted_by_last_name().len(), 5);
        store.check_invariants().unwrap();
    }

    #[test]
    fn remove_first_two_by_last_name() {
        let mut store = sample_store();
        let sorted = store.sorted_by_last_name();
        let person1 = sorted[0].clone();
        let person2 = sorted[1].clone();
        assert!(store.remove(&person1));
        assert!(store.remove(&person2));
        assert_eq!(store.sorted_by_last_name().len(), 4);
        assert!(store.find(&person1.first_name).unwrap().is_empty());
        assert!(store.find(&person2.first_name).unwrap().is_empty());
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut store = sample_store();
        assert!(!store.remove(&Entry::new("Sally", "Graham", "")));
        assert!(!store.remove(&Entry::new("", "", "")));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn remove_drops_emptied_buckets() {
        let mut store = sample_store();
        store.remove(&Entry::new("Jayden", "Riddle", "+44 131 496 0609"));
        assert!(!store.bucket_keys(Field::FirstName).contains(&'J'));
        assert!(!store.bucket_keys(Field::LastName).contains(&'R'));
    }

    #[test]
    fn remove_updates_phone_index() {
        let mut store = EntryStore::with_config(StoreConfig::new(SearchFields::ALL));
        let hamza = Entry::new("Hamza", "Bo", "+44 131 496 0571");
        store.add(hamza.clone()).unwrap();
        assert!(store.remove(&hamza));
        assert!(store.find("+44").unwrap().is_empty());
        store.check_invariants().unwrap();
    }

    #[test]
    fn clear_resets_indexes() {
        let mut store = sample_store();
        store.clear();
        assert!(store.is_empty());
        assert!(store.sorted_by_last_name().is_empty());
        assert!(store.bucket_keys(Field::FirstName).is_empty());
        store.check_invariants().unwrap();
    }

    // ==============================================
    // Buckets
    // ==============================================

    #[test]
    fn bucket_keys_are_ascending_and_folded() {
        let mut store = sample_store();
        store.add(Entry::new("zed", "quinn", "")).unwrap();
        assert_eq!(
            store.bucket_keys(Field::FirstName),
            vec!['A', 'H', 'J', 'P', 'S', 'Z']
        );
        assert_eq!(
            store.bucket_keys(Field::LastName),
            vec!['B', 'G', 'P', 'Q', 'R']
        );
        assert!(store.bucket_keys(Field::PhoneNumber).is_empty());
    }

    // ==============================================
    // Metrics
    // ==============================================

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn metrics_track_operations() {
            let mut store = sample_store();
            store.add(Entry::new("Aaran", "Parks", "")).unwrap();
            let _ = store.add(Entry::new("", "Parks", ""));
            store.remove(&Entry::new("Aaran", "Parks", ""));
            store.remove(&Entry::new("Nobody", "Here", ""));
            store.find("Grah").unwrap();
            let _ = store.find("");
            store.sorted_by_first_name();

            let snap = store.metrics_snapshot();
            assert_eq!(snap.add_calls, 8);
            assert_eq!(snap.add_new, 6);
            assert_eq!(snap.add_duplicates, 1);
            assert_eq!(snap.add_rejected, 1);
            assert_eq!(snap.remove_calls, 2);
            assert_eq!(snap.remove_found, 1);
            assert_eq!(snap.find_calls, 2);
            assert_eq!(snap.find_rejected, 1);
            // no first name starts with G; one last name does
            assert_eq!(snap.find_scan_steps, 1);
            assert_eq!(snap.find_matches, 1);
            assert_eq!(snap.sorted_calls, 1);
            assert_eq!(snap.store_len, 5);
            assert_eq!(snap.phone_buckets, 0);
        }

        #[test]
        fn reset_metrics_keeps_gauges() {
            let mut store = sample_store();
            store.reset_metrics();
            let snap = store.metrics_snapshot();
            assert_eq!(snap.add_calls, 0);
            assert_eq!(snap.store_len, 6);
            assert_eq!(snap.first_name_buckets, 5);
        }
    }

    // ==============================================
    // Property Tests
    // ==============================================

    mod property_tests {
        use super::*;
        use crate::entry::bucket_key;
        use crate::store::flat::FlatStore;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(Entry),
            Remove(Entry),
            Find(String),
        }

        fn name_strategy() -> impl Strategy<Value = String> {
            "[A-Da-d][a-dA-D]{0,3}"
        }

        // Across buckets the folded leading letter decides; inside a bucket
        // the raw text must be non-decreasing.
        fn in_field_order(a: &str, b: &str) -> bool {
            let (ka, kb) = (bucket_key(a), bucket_key(b));
            ka < kb || (ka == kb && a <= b)
        }

        fn entry_strategy() -> impl Strategy<Value = Entry> {
            (name_strategy(), name_strategy(), "[0-9]{0,2}")
                .prop_map(|(first, last, phone)| Entry::new(first, last, phone))
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => entry_strategy().prop_map(Op::Add),
                1 => entry_strategy().prop_map(Op::Remove),
                1 => "[a-dA-D]{1,3}".prop_map(Op::Find),
            ]
        }

        fn run(store: &mut EntryStore, flat: &mut FlatStore, op: &Op) {
            match op {
                Op::Add(e) => {
                    let a = store.add(e.clone()).unwrap();
                    let b = flat.add(e.clone()).unwrap();
                    assert_eq!(a, b);
                },
                Op::Remove(e) => {
                    assert_eq!(store.remove(e), flat.remove(e));
                },
                Op::Find(q) => {
                    let _ = store.find(q).unwrap();
                },
            }
        }

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_invariants_always_hold(
                ops in prop::collection::vec(op_strategy(), 0..120)
            ) {
                let mut store = EntryStore::with_config(StoreConfig::new(SearchFields::ALL));
                let mut flat = FlatStore::new();
                for op in &ops {
                    run(&mut store, &mut flat, op);
                    store.check_invariants().unwrap();
                }
                prop_assert_eq!(store.len(), flat.len());
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_add_is_idempotent(
                entries in prop::collection::vec(entry_strategy(), 0..40),
                again in any::<prop::sample::Index>()
            ) {
                let mut store = EntryStore::new();
                for e in &entries {
                    store.add(e.clone()).unwrap();
                }
                let before: Vec<Entry> =
                    store.sorted_by_first_name().into_iter().cloned().collect();
                if !entries.is_empty() {
                    let e = again.get(&entries).clone();
                    prop_assert!(!store.add(e).unwrap());
                }
                let after: Vec<Entry> =
                    store.sorted_by_first_name().into_iter().cloned().collect();
                prop_assert_eq!(before, after);
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_removed_entry_is_never_found(
                entries in prop::collection::vec(entry_strategy(), 1..40),
                pick in any::<prop::sample::Index>()
            ) {
                let mut store = EntryStore::new();
                for e in &entries {
                    store.add(e.clone()).unwrap();
                }
                let victim = pick.get(&entries).clone();
                prop_assert!(store.remove(&victim));
                prop_assert!(!store.contains(&victim));
                for query in [&victim.first_name, &victim.last_name] {
                    prop_assert!(!store.find(query).unwrap().contains(&&victim));
                }
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_sorted_output_is_non_decreasing(
                entries in prop::collection::vec(entry_strategy(), 0..60)
            ) {
                let mut store = EntryStore::new();
                store.extend(entries);
                let by_first = store.sorted_by_first_name();
                for pair in by_first.windows(2) {
                    prop_assert!(in_field_order(&pair[0].first_name, &pair[1].first_name));
                }
                let by_last = store.sorted_by_last_name();
                for pair in by_last.windows(2) {
                    prop_assert!(in_field_order(&pair[0].last_name, &pair[1].last_name));
                }
                prop_assert_eq!(by_first.len(), store.len());
                prop_assert_eq!(by_last.len(), store.len());
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_find_ignores_case_and_collapses_duplicates(
                entries in prop::collection::vec(entry_strategy(), 0..40),
                query in "[a-dA-D]{1,3}"
            ) {
                let mut store = EntryStore::new();
                store.extend(entries);
                let lower = store.find(&query.to_lowercase()).unwrap();
                let upper = store.find(&query.to_uppercase()).unwrap();
                prop_assert_eq!(&lower, &upper);

                let mut unique = lower.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(unique.len(), lower.len());
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_agrees_with_flat_store(
                entries in prop::collection::vec(entry_strategy(), 0..40),
                query in "[a-dA-D]{1,3}"
            ) {
                let mut store = EntryStore::new();
                let mut flat = FlatStore::new();
                store.extend(entries.clone());
                flat.extend(entries);

                prop_assert_eq!(store.sorted_by_first_name(), flat.sorted_by_first_name());
                prop_assert_eq!(store.sorted_by_last_name(), flat.sorted_by_last_name());

                // bucket-scoped matches are exactly the full-scan matches whose
                // matched field shares the query's leading letter
                let folded = fold_case(&query);
                let full = flat.find(&query).unwrap();
                let mut expected: Vec<&Entry> = full
                    .into_iter()
                    .filter(|e| {
                        [&e.first_name, &e.last_name].iter().any(|f| {
                            let f = fold_case(f);
                            f.starts_with(&folded[..1]) && f.contains(&folded)
                        })
                    })
                    .collect();
                let mut partitioned = store.find(&query).unwrap();
                expected.sort();
                partitioned.sort();
                prop_assert_eq!(partitioned, expected);
            }
        }
    }
}
