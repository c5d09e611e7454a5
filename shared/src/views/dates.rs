//! Calendar relations used by the filters

use chrono::{Datelike, Duration, NaiveDate};

use crate::types::DateRange;

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

pub fn is_tomorrow(date: NaiveDate, today: NaiveDate) -> bool {
    today.succ_opt() == Some(date)
}

/// The Sunday-to-Saturday week containing `today`
pub fn week_of(today: NaiveDate) -> DateRange {
    let start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    DateRange {
        start,
        end: start + Duration::days(6),
    }
}

/// Same Sunday-starting week as `today`, including days already gone
pub fn is_this_week(date: NaiveDate, today: NaiveDate) -> bool {
    week_of(today).contains(date)
}

/// Strictly before today
pub fn is_overdue(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Same calendar month and year
pub fn same_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.month() == today.month() && date.year() == today.year()
}

/// Whole days from `from` to `to`; negative when `to` is earlier
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-05-15 is a Wednesday
        let week = week_of(date(2024, 5, 15));
        assert_eq!(week.start, date(2024, 5, 12));
        assert_eq!(week.end, date(2024, 5, 18));

        // a Sunday is the first day of its own week
        assert_eq!(week_of(date(2024, 5, 12)).start, date(2024, 5, 12));
    }

    #[test]
    fn test_relations() {
        let today = date(2024, 5, 15);
        assert!(is_today(today, today));
        assert!(is_tomorrow(date(2024, 5, 16), today));
        assert!(!is_tomorrow(today, today));
        assert!(is_this_week(date(2024, 5, 13), today));
        assert!(!is_this_week(date(2024, 5, 19), today));
        assert!(is_overdue(date(2024, 5, 14), today));
        assert!(!is_overdue(today, today));
    }

    #[test]
    fn test_same_month_ignores_distance() {
        let today = date(2024, 5, 1);
        assert!(same_month(date(2024, 5, 31), today));
        assert!(!same_month(date(2024, 4, 30), today));
        assert!(!same_month(date(2023, 5, 1), today));
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 5, 1), date(2024, 5, 11)), 10);
        assert_eq!(days_between(date(2024, 5, 11), date(2024, 5, 1)), -10);
    }
}
