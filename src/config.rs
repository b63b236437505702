//! Store configuration.
//!
//! | Field           | Type           | Default                 | Description                      |
//! |-----------------|----------------|-------------------------|----------------------------------|
//! | `search_fields` | `SearchFields` | `{FirstName, LastName}` | Fields `find` matches queries on |
//!
//! Searching the phone number is opt-in: it adds a third bucket index keyed on
//! the phone number's leading character.

use std::fmt;

use crate::entry::Field;

/// Set of [`Field`]s that `find` matches against.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchFields(u8);

impl SearchFields {
    /// No fields. Rejected by [`StoreBuilder::try_build`](crate::builder::StoreBuilder::try_build).
    pub const EMPTY: SearchFields = SearchFields(0);
    /// First and last name (the default).
    pub const NAMES: SearchFields = SearchFields(Self::bit(Field::FirstName) | Self::bit(Field::LastName));
    /// Every field, including the phone number.
    pub const ALL: SearchFields = SearchFields(
        Self::bit(Field::FirstName) | Self::bit(Field::LastName) | Self::bit(Field::PhoneNumber),
    );

    #[inline]
    const fn bit(field: Field) -> u8 {
        match field {
            Field::FirstName => 1,
            Field::LastName => 1 << 1,
            Field::PhoneNumber => 1 << 2,
        }
    }

    /// Returns a copy with `field` added.
    #[inline]
    pub const fn with(self, field: Field) -> Self {
        Self(self.0 | Self::bit(field))
    }

    /// Returns a copy with `field` removed.
    #[inline]
    pub const fn without(self, field: Field) -> Self {
        Self(self.0 & !Self::bit(field))
    }

    #[inline]
    pub const fn contains(self, field: Field) -> bool {
        self.0 & Self::bit(field) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the contained fields in [`Field::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |&f| self.contains(f))
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        Self::NAMES
    }
}

impl FromIterator<Field> for SearchFields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for SearchFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Configuration for [`EntryStore`](crate::store::partitioned::EntryStore)
/// and [`FlatStore`](crate::store::flat::FlatStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub search_fields: SearchFields,
}

impl StoreConfig {
    pub fn new(search_fields: SearchFields) -> Self {
        Self { search_fields }
    }
}
