use crate::domain::DateRange;
use crate::infrastructure::print_invalid_error_log;
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateInputError {
    #[error("invalid date `{0}`: expected YYYY-MM-DD or an RFC 3339 timestamp")]
    Invalid(String),
}

/// Parse a date string into the UTC calendar day it names.
///
/// Accepts plain `YYYY-MM-DD`, RFC 3339 timestamps (normalized to UTC) and
/// naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps.
pub fn parse_date(source: &str) -> Option<NaiveDate> {
    let source = source.trim();
    if source.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(source, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(source) {
        return Some(date_time.with_timezone(&Utc).date_naive());
    }

    NaiveDateTime::parse_from_str(source, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|date_time| date_time.date())
}

pub fn parse_date_strict(source: &str) -> Result<NaiveDate, DateInputError> {
    parse_date(source).ok_or_else(|| DateInputError::Invalid(source.to_string()))
}

/// Parse an optional date prop, warning about (and dropping) malformed input.
pub fn parse_date_or_warn(source: Option<&str>, param: &str) -> Option<NaiveDate> {
    let source = source?;
    let date = parse_date(source);
    if date.is_none() {
        print_invalid_error_log(param);
    }
    date
}

pub fn is_valid_date_string(source: &str) -> bool {
    parse_date(source).is_some()
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn is_same_date(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Shift by `days`, saturating at the ends of the representable calendar.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Shift by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, count: i32) -> NaiveDate {
    let months = Months::new(count.unsigned_abs());
    let shifted = if count >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// Every day from `from` through `to`, inclusive. Never empty.
pub fn from_to(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let span = (to - from).num_days().max(0);
    (0..=span).map(|i| add_days(from, i)).collect()
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        // Only the last representable month has no successor.
        .unwrap_or(NaiveDate::MAX)
}

pub fn get_all_days_in_month(date: NaiveDate) -> Vec<NaiveDate> {
    DateRange::month_of(date).days().collect()
}

pub fn is_lte(a: NaiveDate, b: NaiveDate) -> bool {
    a <= b
}

pub fn is_gte(a: NaiveDate, b: NaiveDate) -> bool {
    a >= b
}

pub fn is_date_not_in_range(
    date: NaiveDate,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
) -> bool {
    let before_min = min_date.is_some_and(|min| !is_gte(date, min));
    let after_max = max_date.is_some_and(|max| !is_lte(date, max));
    before_min || after_max
}

/// Signed number of whole months from `initial`'s month to `current`'s month.
pub fn get_difference_in_month(initial: NaiveDate, current: NaiveDate) -> i32 {
    (current.year() - initial.year()) * 12 + current.month() as i32 - initial.month() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2023-03-27"), Some(d(2023, 3, 27)));
        assert_eq!(parse_date("2023-03-26T22:00:00.000Z"), Some(d(2023, 3, 26)));
        assert_eq!(parse_date("2023-03-27T01:00:00+02:00"), Some(d(2023, 3, 26)));
        assert_eq!(parse_date("2023-04-01T09:23:00"), Some(d(2023, 4, 1)));
    }

    #[test]
    fn test_invalid_date_strings() {
        assert!(!is_valid_date_string("Nineteen ninety ninety nine December First"));
        assert!(!is_valid_date_string(""));
        assert!(!is_valid_date_string("2023-02-30"));
        assert!(is_valid_date_string("2023-03-26T22:00:00.000Z"));
        assert!(matches!(
            parse_date_strict("tomorrow"),
            Err(DateInputError::Invalid(s)) if s == "tomorrow"
        ));
    }

    #[test]
    fn test_parse_date_or_warn_drops_garbage() {
        assert_eq!(parse_date_or_warn(None, "minDate"), None);
        assert_eq!(parse_date_or_warn(Some("nope"), "minDate"), None);
        assert_eq!(
            parse_date_or_warn(Some("2024-02-29"), "minDate"),
            Some(d(2024, 2, 29))
        );
    }

    #[test]
    fn test_all_days_in_month() {
        assert_eq!(get_all_days_in_month(d(2023, 1, 15)).len(), 31);
        assert_eq!(get_all_days_in_month(d(2023, 2, 2)).len(), 28);
        assert_eq!(get_all_days_in_month(d(2024, 2, 2)).len(), 29);
        assert_eq!(get_all_days_in_month(d(2023, 4, 27)).len(), 30);
        assert_eq!(get_all_days_in_month(d(2023, 12, 24)).len(), 31);
    }

    #[test]
    fn test_month_boundaries() {
        assert_eq!(start_of_month(d(2023, 4, 15)), d(2023, 4, 1));
        assert_eq!(last_day_of_month(d(2023, 2, 10)), d(2023, 2, 28));
        assert_eq!(last_day_of_month(d(2000, 2, 10)), d(2000, 2, 29));
        assert_eq!(last_day_of_month(d(1900, 2, 10)), d(1900, 2, 28));
        assert_eq!(last_day_of_month(d(2023, 12, 31)), d(2023, 12, 31));
        assert_eq!(last_day_of_month(NaiveDate::MAX), NaiveDate::MAX);
        assert_eq!(start_of_month(NaiveDate::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(d(2023, 3, 31), 1), d(2023, 4, 1));
        assert_eq!(add_days(d(2024, 3, 1), -1), d(2024, 2, 29));
        assert_eq!(add_days(NaiveDate::MIN, -7), NaiveDate::MIN);
        assert_eq!(add_days(NaiveDate::MAX, 7), NaiveDate::MAX);
        assert_eq!(add_days(d(2023, 1, 1), i64::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_comparisons() {
        let today = d(2023, 3, 27);
        let tomorrow = d(2023, 3, 28);
        assert!(is_lte(today, tomorrow));
        assert!(!is_gte(today, tomorrow));
        assert!(is_lte(today, today) && is_gte(today, today));

        assert!(is_same_date(d(2023, 12, 31), d(2023, 12, 31)));
        assert!(!is_same_date(d(2023, 12, 31), d(2024, 1, 1)));
        assert!(is_same_month(d(2023, 1, 1), d(2023, 1, 31)));
        assert!(!is_same_month(d(2023, 1, 1), d(2024, 1, 1)));
    }

    #[test]
    fn test_is_date_not_in_range() {
        let min = Some(d(2022, 12, 31));
        let max = Some(d(2024, 1, 1));
        assert!(!is_date_not_in_range(d(2023, 4, 1), min, max));
        assert!(is_date_not_in_range(d(2025, 4, 1), min, max));
        assert!(is_date_not_in_range(d(2022, 1, 1), min, None));
        assert!(!is_date_not_in_range(d(2099, 1, 1), min, None));
        assert!(!is_date_not_in_range(d(1999, 1, 1), None, None));
    }

    #[test]
    fn test_difference_in_month() {
        assert_eq!(get_difference_in_month(d(2023, 1, 1), d(2023, 12, 25)), 11);
        assert_eq!(get_difference_in_month(d(2023, 12, 25), d(2023, 1, 1)), -11);
        assert_eq!(get_difference_in_month(d(2022, 11, 30), d(2023, 2, 1)), 3);
    }

    #[test]
    fn test_from_to() {
        let days = from_to(d(2023, 1, 5), d(2023, 1, 7));
        assert_eq!(days, vec![d(2023, 1, 5), d(2023, 1, 6), d(2023, 1, 7)]);
        assert_eq!(from_to(d(2023, 1, 7), d(2023, 1, 5)), vec![d(2023, 1, 7)]);
    }

    #[test]
    fn test_add_months_clamps() {
        assert_eq!(add_months(d(2023, 1, 31), 1), d(2023, 2, 28));
        assert_eq!(add_months(d(2023, 3, 31), -1), d(2023, 2, 28));
        assert_eq!(add_months(d(2023, 11, 15), 2), d(2024, 1, 15));
    }
}
