//! Error types for the contactkit library.
//!
//! ## Key Components
//!
//! - [`StoreError`]: Returned when an entry, query, or configuration cannot
//!   be used by a store (empty name fields, empty queries, empty search-field
//!   sets).
//! - [`InvariantError`]: Returned when internal index invariants are violated
//!   (`check_invariants` methods).
//!
//! "Not found" is never an error: removing an absent entry and a query with no
//! matches are ordinary outcomes (`false` / empty `Vec`). Inserting an entry
//! that is already present is a no-op, not an error.
//!
//! ## Example Usage
//!
//! ```
//! use contactkit::entry::{Entry, Field};
//! use contactkit::error::StoreError;
//! use contactkit::store::partitioned::EntryStore;
//!
//! let mut store = EntryStore::new();
//!
//! // Bucket keys cannot be derived from an empty name
//! let err = store.add(Entry::new("", "Graham", "")).unwrap_err();
//! assert_eq!(err, StoreError::InvalidEntry { field: Field::FirstName });
//!
//! // Empty queries are rejected rather than matching everything
//! assert_eq!(store.find("").unwrap_err(), StoreError::InvalidQuery);
//! ```

use thiserror::Error;

use crate::entry::Field;

/// Convenience alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Error returned when input handed to a store is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The entry has an empty name field, so no bucket key can be derived.
    #[error("invalid entry: {field} must not be empty")]
    InvalidEntry { field: Field },

    /// The query is empty, so no bucket can be selected.
    #[error("invalid query: query must not be empty")]
    InvalidQuery,

    /// Store configuration parameters are invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal index invariants are violated.
///
/// Produced by `check_invariants` methods on index and store types
/// (e.g. [`EntryStore::check_invariants`](crate::store::partitioned::EntryStore::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
