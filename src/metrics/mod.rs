//! Operation counters for [`EntryStore`](crate::store::partitioned::EntryStore),
//! compiled in with the `metrics` feature.
//!
//! `find_scan_steps` counts bucket candidates inspected, which is the cost the
//! partitioned layout bounds; compare it against `store_len` to see how much a
//! full scan would have cost.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
