//! Derived views over already-fetched collections
//!
//! Everything here is pure and synchronous. Callers fetch full collections
//! from the store, then ask for a filtered and sorted projection or for
//! summary statistics. "Today" is always passed in so views are
//! deterministic.
//!
//! Filter and sort selectors are closed enums. Their string forms are parsed
//! with `FromStr` (and through serde, for query strings), so an unknown key
//! fails when the selector is built instead of silently matching everything.

mod crops;
mod dashboard;
mod dates;
mod expenses;
mod tasks;

pub use crops::*;
pub use dashboard::*;
pub use dates::*;
pub use expenses::*;
pub use tasks::*;

use serde::de::{value::StrDeserializer, DeserializeOwned, IntoDeserializer};

/// A filter or sort key that is not part of the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownSelector {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownSelector {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Parse a model enum from its wire name ("high", "seeds", "growing", ...)
pub(crate) fn parse_wire_name<T: DeserializeOwned>(value: &str) -> Option<T> {
    let deserializer: StrDeserializer<'_, serde::de::value::Error> = value.into_deserializer();
    T::deserialize(deserializer).ok()
}

/// Sort a copy of `items` with a stable comparator; the input is untouched
pub(crate) fn sorted_by<T: Clone>(
    items: &[T],
    compare: impl FnMut(&T, &T) -> std::cmp::Ordering,
) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(compare);
    sorted
}
