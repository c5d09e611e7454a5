//! Common types used across the platform

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Integer identifier assigned by the entity store
pub type RecordId = u32;

/// A record stored in an entity collection
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in error messages ("Farm", "Crop", ...)
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);
}

/// Next identifier for a collection: one past the largest id, or 1 when empty.
/// `None` once the largest id is `RecordId::MAX`.
pub fn next_id<'a, T: Record>(records: impl IntoIterator<Item = &'a T>) -> Option<RecordId> {
    records.into_iter().map(Record::id).max().unwrap_or(0).checked_add(1)
}

/// Deserializer for nullable update fields, used with `#[serde(default)]`.
///
/// An absent key stays `None` (keep the stored value), `null` becomes
/// `Some(None)` (clear it), and a value becomes `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(start);
        Self { start, end }
    }

    /// The calendar month before the one containing `date`
    pub fn previous_month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        match first.pred_opt() {
            Some(last_of_previous) => Self::month_of(last_of_previous),
            None => Self::month_of(first),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
