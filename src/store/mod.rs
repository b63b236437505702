//! Entry store layouts.
//!
//! - [`partitioned`]: bucketed, pre-sorted indexes (the directory core)
//! - [`flat`]: single vector with full scans (baseline)
//! - `concurrent`: lock-wrapped partitioned store (`concurrency` feature)

#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod flat;
pub mod partitioned;
