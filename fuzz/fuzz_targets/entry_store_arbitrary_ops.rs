#![no_main]

use contactkit::entry::Entry;
use contactkit::store::flat::FlatStore;
use contactkit::store::partitioned::EntryStore;
use libfuzzer_sys::fuzz_target;

const NAMES: [&str; 8] = ["Al", "al", "Bo", "Bond", "Ça", "ßig", "Zed", "zz"];

fn entry(a: u8, b: u8) -> Entry {
    Entry::new(
        NAMES[(a & 7) as usize],
        NAMES[((a >> 3) & 7) as usize],
        if b & 1 == 0 { String::new() } else { format!("{}", b >> 1) },
    )
}

// Fuzz arbitrary operation sequences on EntryStore
//
// Tests random sequences of add, remove, find, sorted, clear operations
// against the flat baseline.
fuzz_target!(|data: &[u8]| {
    let mut store = EntryStore::new();
    let mut flat = FlatStore::new();

    for chunk in data.chunks_exact(3) {
        let op = chunk[0] % 5;
        let e = entry(chunk[1], chunk[2]);

        match op {
            0 => {
                // add
                let a = store.add(e.clone()).unwrap();
                let b = flat.add(e.clone()).unwrap();
                assert_eq!(a, b);
                assert!(store.contains(&e));
            }
            1 => {
                // remove
                assert_eq!(store.remove(&e), flat.remove(&e));
                assert!(!store.contains(&e));
            }
            2 => {
                // find: every bucket-scoped match is also a full-scan match
                let query = NAMES[(chunk[1] & 7) as usize];
                let full = flat.find(query).unwrap();
                for found in store.find(query).unwrap() {
                    assert!(full.contains(&found));
                }
            }
            3 => {
                // sorted
                assert_eq!(store.sorted_by_first_name(), flat.sorted_by_first_name());
                assert_eq!(store.sorted_by_last_name(), flat.sorted_by_last_name());
            }
            4 => {
                // clear
                if chunk[1] == 0 {
                    store.clear();
                    flat.clear();
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(store.len(), flat.len());
    }

    store.check_invariants().unwrap();
});
