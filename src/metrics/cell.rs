use std::sync::atomic::{AtomicU64, Ordering};

/// A metrics-only counter for paths that take `&self`.
///
/// Shared readers of a [`ConcurrentEntryStore`](crate::store::concurrent::ConcurrentEntryStore)
/// record through the same cell at once, so increments are atomic. Relaxed
/// ordering is enough: counters are observational and never gate other state.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.add(1);
    }

    #[inline]
    pub fn add(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}
