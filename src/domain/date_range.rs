use crate::domain::date::{last_day_of_month, start_of_month};
use chrono::NaiveDate;

/// Inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from two bounds given in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: start_of_month(date),
            end: last_day_of_month(date),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start;
        let end = self.end;
        (0..=(end - start).num_days()).map(move |i| start + chrono::Duration::days(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_new_orders_bounds() {
        let range = DateRange::new(d(2023, 5, 10), d(2023, 5, 1));
        assert_eq!(range.start, d(2023, 5, 1));
        assert_eq!(range.end, d(2023, 5, 10));
        assert_eq!(range.days().count(), 10);
    }

    #[test]
    fn test_month_of() {
        let range = DateRange::month_of(d(2024, 2, 17));
        assert_eq!(range.start, d(2024, 2, 1));
        assert_eq!(range.end, d(2024, 2, 29));
        assert!(range.contains(d(2024, 2, 29)));
        assert!(!range.contains(d(2024, 3, 1)));
        assert_eq!(range.days().count(), 29);
    }

    #[test]
    fn test_single_day() {
        let range = DateRange::day(d(2023, 1, 1));
        assert_eq!(range.days().collect::<Vec<_>>(), vec![d(2023, 1, 1)]);
    }
}
