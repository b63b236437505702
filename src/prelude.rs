pub use crate::builder::{Store, StoreBuilder, StoreLayout};
pub use crate::config::{SearchFields, StoreConfig};
pub use crate::entry::{Entry, Field};
pub use crate::error::{InvariantError, StoreError};
pub use crate::store::flat::FlatStore;
pub use crate::store::partitioned::EntryStore;
pub use crate::traits::{Directory, ReadOnlyDirectory};

#[cfg(feature = "concurrency")]
pub use crate::store::concurrent::ConcurrentEntryStore;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::StoreMetricsSnapshot;
