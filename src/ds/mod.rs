pub mod bucket_index;

pub use bucket_index::{BucketIndex, IndexInsert};
