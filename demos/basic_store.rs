use contactkit::prelude::{Entry, EntryStore};

fn main() {
    // Create an empty contact directory
    let mut store = EntryStore::new();

    // Add a few people
    for (first, last, phone) in [
        ("Sally", "Graham", "+44 7700 900297"),
        ("Phoenix", "Bond", "0161 496 0311"),
        ("Aaran", "Parks", ""),
        ("Hamza", "Bo", "+44 131 496 0571"),
    ] {
        if let Err(err) = store.add(Entry::new(first, last, phone)) {
            eprintln!("skipped {first} {last}: {err}");
        }
    }

    // Look someone up by part of a name
    match store.find("grah") {
        Ok(found) => {
            for entry in found {
                println!("Found: {}", entry);
            }
        },
        Err(err) => eprintln!("bad query: {err}"),
    }

    // List everyone by last name
    for entry in store.sorted_by_last_name() {
        println!("{}", entry);
    }
}
