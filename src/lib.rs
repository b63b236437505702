//! contactkit: an in-memory contact directory with partitioned, pre-sorted
//! name indexes.
//!
//! Entries are bucketed by the case-folded leading letter of their first and
//! last names. Lookups scan one bucket per searched field, and sorted
//! enumeration walks the buckets in key order instead of re-sorting.
//!
//! See [`store::partitioned`] for the index layout and [`entry`] for the
//! ordering rules.

pub mod builder;
pub mod config;
pub mod ds;
pub mod entry;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod store;
pub mod traits;
