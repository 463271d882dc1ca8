use crate::domain::date::{is_date_not_in_range, is_same_month};
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayState {
    #[default]
    Default,
    Today,
    Disabled,
    Selected,
}

impl DayState {
    pub fn is_disabled(self) -> bool {
        self == DayState::Disabled
    }
}

impl fmt::Display for DayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayState::Default => "",
            DayState::Today => "today",
            DayState::Disabled => "disabled",
            DayState::Selected => "selected",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateOptions {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub disabled_by_default: bool,
    pub selected: Option<NaiveDate>,
}

/// Resolve the state of `day` inside the grid of `current`'s month.
///
/// Rules are applied in order and later ones win: today, selection,
/// disabled-by-default, min/max bounds, days borrowed from another month.
pub fn get_state(
    day: NaiveDate,
    current: NaiveDate,
    today: NaiveDate,
    options: &StateOptions,
) -> DayState {
    let mut state = DayState::Default;

    if day == today {
        state = DayState::Today;
    }

    if options.selected == Some(day) {
        state = DayState::Selected;
    }

    if options.disabled_by_default {
        state = DayState::Disabled;
    }

    if is_date_not_in_range(day, options.min_date, options.max_date) {
        state = DayState::Disabled;
    }

    if !is_same_month(day, current) {
        state = DayState::Disabled;
    }

    state
}
