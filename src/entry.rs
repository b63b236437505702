//! Contact entry value type and the case-normalization helpers shared by every
//! index.
//!
//! ## Key Components
//!
//! - [`Entry`]: one contact (first name, last name, phone number)
//! - [`Field`]: names one of the three entry fields
//! - [`fold_case`]: the single text normalization used for bucket keys,
//!   stored search keys, and queries
//! - [`bucket_key`]: leading character of the folded text
//! - [`SortKey`]: per-field ordering key used by every store
//!
//! ## Ordering
//!
//! `Entry` derives a composite total order: first name, then last name, then
//! phone number. Two entries compare equal only when all three fields are
//! equal, so the order is safe to use inside ordered sets.
//!
//! Field-specific orders go through [`SortKey`]:
//!
//! ```text
//!   SortKey(FirstName) = (bucket(first), first, last,  entry)
//!   SortKey(LastName)  = (bucket(last),  last,  first, entry)
//!   SortKey(Phone)     = (bucket(phone), phone, last,  entry)
//! ```
//!
//! The bucket key leads, so the ascending concatenation of buckets is already
//! sorted by `SortKey`. Inside a bucket the raw field text decides, which is
//! plain codepoint order: "McDonald" sorts before "Mcallister". Only entries
//! whose leading letters differ in case ("bob" after "Alice", before "Carl")
//! depart from codepoint order.
//!
//! ## Example Usage
//!
//! ```
//! use contactkit::entry::{Entry, Field, bucket_key, fold_case};
//!
//! let entry = Entry::new("Sally", "Graham", "+44 7700 900297");
//! assert_eq!(entry.field(Field::LastName), "Graham");
//! assert_eq!(fold_case("graham"), "GRAHAM");
//! assert_eq!(bucket_key("graham"), Some('G'));
//! assert_eq!(bucket_key(""), None);
//! ```

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three fields of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Field {
    FirstName,
    LastName,
    PhoneNumber,
}

impl Field {
    /// All fields in declaration order.
    pub const ALL: [Field; 3] = [Field::FirstName, Field::LastName, Field::PhoneNumber];

    /// Field used to break ties when ordering by `self`.
    #[inline]
    pub fn secondary(self) -> Field {
        match self {
            Field::FirstName => Field::LastName,
            Field::LastName => Field::FirstName,
            Field::PhoneNumber => Field::LastName,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::PhoneNumber => "phone number",
        })
    }
}

/// A single contact record.
///
/// Entries are plain values: equality, hashing, and ordering use all three
/// fields. Two people with the same name are distinct entries as long as
/// their phone numbers differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl Entry {
    /// Creates an entry from its three fields. The phone number may be empty.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Returns the text of `field`.
    #[inline]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::PhoneNumber => &self.phone_number,
        }
    }

    /// Returns the first name field that is empty, if any.
    ///
    /// Entries with an empty name cannot be placed in a name bucket.
    pub fn missing_name(&self) -> Option<Field> {
        if self.first_name.is_empty() {
            Some(Field::FirstName)
        } else if self.last_name.is_empty() {
            Some(Field::LastName)
        } else {
            None
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.phone_number.is_empty() {
            write!(f, "{} {}", self.first_name, self.last_name)
        } else {
            write!(
                f,
                "{} {} ({})",
                self.first_name, self.last_name, self.phone_number
            )
        }
    }
}

/// Case-normalizes `text` for comparison and bucketing.
///
/// Every index and query path goes through this function so insert-time and
/// query-time normalization cannot drift apart.
#[inline]
pub fn fold_case(text: &str) -> String {
    text.to_uppercase()
}

/// Returns the bucket key for `text`: the first character of its folded form.
///
/// Returns `None` for empty text.
#[inline]
pub fn bucket_key(text: &str) -> Option<char> {
    // Folding can expand a char ("ß" -> "SS"); the leading char of the folded
    // text is still the leading char of the folded first char.
    let first = text.chars().next()?;
    first.to_uppercase().next()
}

/// Ordering key of an entry with respect to one field.
///
/// Orders by bucket key, then the raw primary and secondary field text. The
/// entry itself is the final tie-break, which keeps the order total and
/// consistent with `Entry` equality. The folded primary text rides along for
/// substring matching and never decides an ordering on its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    bucket: Option<char>,
    primary: String,
    secondary: String,
    folded: String,
}

impl SortKey {
    /// Builds the key of `entry` for ordering by `field`.
    pub fn new(entry: &Entry, field: Field) -> Self {
        let primary = entry.field(field);
        Self {
            bucket: bucket_key(primary),
            primary: primary.to_owned(),
            secondary: entry.field(field.secondary()).to_owned(),
            folded: fold_case(primary),
        }
    }

    /// Raw text of the field being ordered on.
    #[inline]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Folded text of the field being ordered on.
    #[inline]
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Bucket key of the ordered field, or `None` when it is empty.
    #[inline]
    pub fn bucket(&self) -> Option<char> {
        self.bucket
    }
}

/// Compares two entries by `field` using [`SortKey`] semantics.
pub fn compare_by(a: &Entry, b: &Entry, field: Field) -> Ordering {
    SortKey::new(a, field)
        .cmp(&SortKey::new(b, field))
        .then_with(|| a.cmp(b))
}
