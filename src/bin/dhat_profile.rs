//! DHAT heap profiler for contactkit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use contactkit::config::{SearchFields, StoreConfig};
use contactkit::entry::Entry;
use contactkit::store::flat::FlatStore;
use contactkit::store::partitioned::EntryStore;
use contactkit::traits::Directory;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn name(&mut self, len: usize) -> String {
        let mut name = String::with_capacity(len);
        for i in 0..len {
            let c = LETTERS[(self.next_u64() % LETTERS.len() as u64) as usize] as char;
            name.push(if i == 0 { c } else { c.to_ascii_lowercase() });
        }
        name
    }

    fn entry(&mut self) -> Entry {
        let first_len = 3 + (self.next_u64() % 6) as usize;
        let last_len = 2 + (self.next_u64() % 8) as usize;
        let phone = if self.next_u64() % 5 == 0 {
            String::new()
        } else {
            format!("+44 {:010}", self.next_u64() % 10_000_000_000)
        };
        Entry::new(self.name(first_len), self.name(last_len), phone)
    }
}

/// Load, query, enumerate, then remove half of what was loaded.
fn churn<D: Directory>(dir: &mut D, operations: usize, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let loaded: Vec<Entry> = (0..operations).map(|_| rng.entry()).collect();
    for entry in &loaded {
        let _ = dir.add(entry.clone());
    }

    let mut matches = 0usize;
    for _ in 0..operations / 10 {
        let query = rng.name(2);
        matches += dir.find(&query).map_or(0, |found| found.len());
    }
    println!("  Matches: {matches}");

    println!("  Sorted: {}", dir.sorted_by_last_name().len());

    for entry in loaded.iter().step_by(2) {
        dir.remove(entry);
    }
    println!("  Final size: {}", dir.len());
}

fn profile_partitioned() {
    println!("=== Profiling partitioned store ===");
    let mut store = EntryStore::new();
    churn(&mut store, 50_000, 42);
}

fn profile_partitioned_with_phone() {
    println!("=== Profiling partitioned store (phone index) ===");
    let mut store = EntryStore::with_config(StoreConfig::new(SearchFields::ALL));
    churn(&mut store, 50_000, 42);
}

fn profile_flat() {
    println!("=== Profiling flat store ===");
    let mut store = FlatStore::new();
    churn(&mut store, 10_000, 42);
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("contactkit DHAT Heap Profiling");
    println!("==============================\n");

    profile_partitioned();
    profile_partitioned_with_phone();
    profile_flat();

    println!("\n==============================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
