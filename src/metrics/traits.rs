//! # Metrics Traits
//!
//! Recording, snapshotting, and resetting are split into small traits so the
//! store only writes counters and consumers only read them.
//!
//! ```text
//!   ┌─────────────────────────────┐     ┌─────────────────────────────┐
//!   │    StoreMetricsRecorder     │     │  StoreMetricsReadRecorder   │
//!   │  add/remove/clear (&mut)    │     │  find/sorted (&self)        │
//!   └──────────────┬──────────────┘     └──────────────┬──────────────┘
//!                  └───────────────┬───────────────────┘
//!                                  ▼
//!                        ┌───────────────────┐
//!                        │   StoreMetrics    │
//!                        └─────────┬─────────┘
//!                                  ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsReset                 │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters for mutating store operations.
pub trait StoreMetricsRecorder {
    fn record_add_call(&mut self);
    fn record_add_new(&mut self);
    fn record_add_duplicate(&mut self);
    fn record_add_rejected(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_clear(&mut self);
}

/// Counters for read-only store operations (interior mutability).
pub trait StoreMetricsReadRecorder {
    fn record_find_call(&self);
    fn record_find_rejected(&self);
    fn record_find_scan_steps(&self, steps: u64);
    fn record_find_matches(&self, matches: u64);
    fn record_sorted_call(&self);
}

/// Produce a snapshot of current metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
