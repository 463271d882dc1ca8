use crate::domain::DateRange;
use crate::domain::date::{add_days, from_to, is_same_month, start_of_month};
use chrono::{Datelike, NaiveDate};

pub const DAYS_IN_WEEK: usize = 7;
pub const SIX_WEEKS: usize = 6 * DAYS_IN_WEEK;

/// Map any first-day offset onto 0..=6, where 0 is Sunday.
pub fn normalize_first_day(first_day: i32) -> u32 {
    first_day.rem_euclid(7) as u32
}

/// Last weekday of a week that starts on `first_day` (Saturday for Sunday starts).
pub fn last_day_of_week(first_day: i32) -> u32 {
    (normalize_first_day(first_day) + 6) % 7
}

/// Compute the visible grid for the month containing `date`.
///
/// The month's days are padded backward to the configured first day of the
/// week and forward to the matching last day. With `show_six_weeks` the grid
/// is extended by whole weeks until it holds six of them. Padding stops at
/// the first and last representable dates.
pub fn page(date: NaiveDate, first_day: i32, show_six_weeks: bool) -> Vec<NaiveDate> {
    let month = DateRange::month_of(date);
    let fdow = normalize_first_day(first_day);
    let ldow = last_day_of_week(first_day);

    let leading = (month.start.weekday().num_days_from_sunday() + 7 - fdow) % 7;
    let trailing = (ldow + 7 - month.end.weekday().num_days_from_sunday()) % 7;

    let from = add_days(month.start, -(leading as i64));
    let mut to = add_days(month.end, trailing as i64);

    if show_six_weeks {
        while ((to - from).num_days() as usize + 1) < SIX_WEEKS && to < NaiveDate::MAX {
            to = add_days(to, DAYS_IN_WEEK as i64);
        }
    }

    from_to(from, to)
}

/// One month's grid, ready to be split into week rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthPage {
    pub month: NaiveDate,
    pub first_day: i32,
    pub days: Vec<NaiveDate>,
}

impl MonthPage {
    pub fn new(date: NaiveDate, first_day: i32, show_six_weeks: bool) -> Self {
        Self {
            month: start_of_month(date),
            first_day,
            days: page(date, first_day, show_six_weeks),
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(DAYS_IN_WEEK)
    }

    pub fn week_count(&self) -> usize {
        self.days.len() / DAYS_IN_WEEK
    }

    /// Row index of `date` in the grid, if the grid shows it.
    pub fn week_index_of(&self, date: NaiveDate) -> Option<usize> {
        self.days
            .iter()
            .position(|&day| day == date)
            .map(|i| i / DAYS_IN_WEEK)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains(&date)
    }

    /// Whether `date` is padding borrowed from an adjacent month.
    pub fn is_extra_day(&self, date: NaiveDate) -> bool {
        !is_same_month(date, self.month)
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }
}
