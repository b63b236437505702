/// Point-in-time copy of [`EntryStore`](crate::store::partitioned::EntryStore) counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreMetricsSnapshot {
    pub add_calls: u64,
    pub add_new: u64,
    pub add_duplicates: u64,
    pub add_rejected: u64,

    pub remove_calls: u64,
    pub remove_found: u64,

    pub clear_calls: u64,

    pub find_calls: u64,
    pub find_rejected: u64,
    pub find_scan_steps: u64, // bucket candidates inspected across all indexes
    pub find_matches: u64,    // entries returned after de-duplication

    pub sorted_calls: u64,

    // gauges captured at snapshot time
    pub store_len: usize,
    pub first_name_buckets: usize,
    pub last_name_buckets: usize,
    pub phone_buckets: usize,
}

impl StoreMetricsSnapshot {
    /// Average candidates inspected per accepted `find` call.
    pub fn scan_steps_per_find(&self) -> f64 {
        let accepted = self.find_calls - self.find_rejected;
        if accepted == 0 {
            0.0
        } else {
            self.find_scan_steps as f64 / accepted as f64
        }
    }
}
