use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::StoreMetricsSnapshot;
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, StoreMetricsReadRecorder, StoreMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct StoreMetrics {
    pub add_calls: u64,
    pub add_new: u64,
    pub add_duplicates: u64,
    pub add_rejected: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub clear_calls: u64,
    pub find_calls: MetricsCell,
    pub find_rejected: MetricsCell,
    pub find_scan_steps: MetricsCell,
    pub find_matches: MetricsCell,
    pub sorted_calls: MetricsCell,
}

impl StoreMetricsRecorder for StoreMetrics {
    fn record_add_call(&mut self) {
        self.add_calls += 1;
    }

    fn record_add_new(&mut self) {
        self.add_new += 1;
    }

    fn record_add_duplicate(&mut self) {
        self.add_duplicates += 1;
    }

    fn record_add_rejected(&mut self) {
        self.add_rejected += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl StoreMetricsReadRecorder for StoreMetrics {
    fn record_find_call(&self) {
        self.find_calls.incr();
    }

    fn record_find_rejected(&self) {
        self.find_rejected.incr();
    }

    fn record_find_scan_steps(&self, steps: u64) {
        self.find_scan_steps.add(steps);
    }

    fn record_find_matches(&self, matches: u64) {
        self.find_matches.add(matches);
    }

    fn record_sorted_call(&self) {
        self.sorted_calls.incr();
    }
}

/// Counters only; gauges are filled in by the owning store.
impl MetricsSnapshotProvider<StoreMetricsSnapshot> for StoreMetrics {
    fn snapshot(&self) -> StoreMetricsSnapshot {
        StoreMetricsSnapshot {
            add_calls: self.add_calls,
            add_new: self.add_new,
            add_duplicates: self.add_duplicates,
            add_rejected: self.add_rejected,
            remove_calls: self.remove_calls,
            remove_found: self.remove_found,
            clear_calls: self.clear_calls,
            find_calls: self.find_calls.get(),
            find_rejected: self.find_rejected.get(),
            find_scan_steps: self.find_scan_steps.get(),
            find_matches: self.find_matches.get(),
            sorted_calls: self.sorted_calls.get(),
            ..StoreMetricsSnapshot::default()
        }
    }
}

impl MetricsReset for StoreMetrics {
    fn reset_metrics(&mut self) {
        *self = StoreMetrics::default();
    }
}
