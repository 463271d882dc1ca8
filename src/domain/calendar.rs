use crate::domain::accessibility::day_accessibility_label;
use crate::domain::date::{
    add_months, is_date_not_in_range, is_same_month, parse_date_or_warn, start_of_month,
};
use crate::domain::day_state::{DayState, StateOptions, get_state};
use crate::domain::marking::{DayMarking, Markings};
use crate::domain::page::MonthPage;
use crate::infrastructure::{
    CalendarEvent, DateFormatter, FormatOptions, HookRegistry, format_accessibility_date,
    format_month, to_marking_format, week_day_names,
};
use chrono::{Datelike, NaiveDate, Utc};
use log::debug;
use std::sync::Arc;

pub const DEFAULT_CALENDAR_WIDTH: f32 = 360.0;
pub const SWIPE_RANGE_OFFSET: f32 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderOptions {
    /// strftime pattern for the title
    pub month_format: String,
    pub custom_title: Option<String>,
    pub hide_day_names: bool,
    pub hide_arrows: bool,
    pub disable_arrow_left: bool,
    pub disable_arrow_right: bool,
    /// Weekday columns (0-based, after rotation) drawn as disabled
    pub disabled_days_indexes: Vec<usize>,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            month_format: "%B".to_string(),
            custom_title: None,
            hide_day_names: false,
            hide_arrows: false,
            disable_arrow_left: false,
            disable_arrow_right: false,
            disabled_days_indexes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarOptions {
    /// 0 = Sunday, 1 = Monday, ...; any integer is accepted
    pub first_day: i32,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub hide_extra_days: bool,
    pub disable_month_change: bool,
    pub allow_selection_out_of_range: bool,
    pub disabled_by_default: bool,
    pub show_six_weeks: bool,
    pub enable_swipe_months: bool,
    pub calendar_width: f32,
    pub header: HeaderOptions,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            first_day: 0,
            min_date: None,
            max_date: None,
            hide_extra_days: false,
            disable_month_change: false,
            allow_selection_out_of_range: false,
            disabled_by_default: false,
            show_six_weeks: false,
            enable_swipe_months: false,
            calendar_width: DEFAULT_CALENDAR_WIDTH,
            header: HeaderOptions::default(),
        }
    }
}

impl CalendarOptions {
    pub fn with_first_day(mut self, first_day: i32) -> Self {
        self.first_day = first_day;
        self
    }

    /// Set the lower bound from a date string; malformed input is logged and ignored.
    pub fn with_min_date(mut self, min_date: &str) -> Self {
        self.min_date = parse_date_or_warn(Some(min_date), "minDate");
        self
    }

    pub fn with_max_date(mut self, max_date: &str) -> Self {
        self.max_date = parse_date_or_warn(Some(max_date), "maxDate");
        self
    }

    fn state_options(&self, selected: Option<NaiveDate>) -> StateOptions {
        StateOptions {
            min_date: self.min_date,
            max_date: self.max_date,
            disabled_by_default: self.disabled_by_default,
            selected,
        }
    }
}

/// One rendered grid position.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Zero-padded day of month, e.g. `"05"`
    pub label: String,
    pub state: DayState,
    /// Extra day from an adjacent month that the host should leave blank
    pub hidden: bool,
    pub marking: DayMarking,
    pub accessibility_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarHeader {
    pub title: String,
    pub year: i32,
    pub week_day_names: Vec<String>,
    pub disabled_days_indexes: Vec<usize>,
    pub show_arrows: bool,
    pub left_arrow_disabled: bool,
    pub right_arrow_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Horizontal swipe recognition over touch start/end positions.
#[derive(Debug, Clone, Copy)]
pub struct SwipeDetector {
    width: f32,
    range_offset: f32,
}

impl SwipeDetector {
    pub fn new(width: f32, range_offset: f32) -> Self {
        Self {
            width,
            range_offset,
        }
    }

    pub fn detect(&self, start_x: f32, end_x: f32) -> Option<SwipeDirection> {
        let range = self.width / self.range_offset;
        if end_x - start_x > range {
            Some(SwipeDirection::Right)
        } else if start_x - end_x > range {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }
}

/// A single month calendar: current month, overlays, selection and callbacks.
pub struct Calendar {
    current_month: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    options: CalendarOptions,
    markings: Markings,
    formatter: Arc<dyn DateFormatter>,
    hooks: HookRegistry,
}

impl Calendar {
    /// Start at `current` if it parses, otherwise at today.
    pub fn new(
        current: Option<&str>,
        options: CalendarOptions,
        formatter: Arc<dyn DateFormatter>,
    ) -> Self {
        let today = Utc::now().date_naive();
        let month = parse_date_or_warn(current, "current").unwrap_or(today);
        Self::for_month(month, options, formatter).with_today(today)
    }

    pub fn for_month(
        month: NaiveDate,
        options: CalendarOptions,
        formatter: Arc<dyn DateFormatter>,
    ) -> Self {
        Self {
            current_month: start_of_month(month),
            selected: None,
            today: Utc::now().date_naive(),
            options,
            markings: Markings::default(),
            formatter,
            hooks: HookRegistry::new(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_markings(mut self, markings: Markings) -> Self {
        self.markings = markings;
        self
    }

    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn select(&mut self, date: Option<NaiveDate>) {
        self.selected = date;
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    pub fn markings(&self) -> &Markings {
        &self.markings
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    pub fn formatter(&self) -> &dyn DateFormatter {
        self.formatter.as_ref()
    }

    pub fn page(&self) -> MonthPage {
        MonthPage::new(
            self.current_month,
            self.options.first_day,
            self.options.show_six_weeks,
        )
    }

    /// Move to `date`'s month. Returns whether the visible month changed.
    pub fn update_month(&mut self, date: NaiveDate) -> bool {
        if is_same_month(date, self.current_month) {
            return false;
        }

        self.current_month = start_of_month(date);
        debug!("visible month -> {}", self.current_month.format("%Y-%m"));
        self.hooks
            .dispatch(&CalendarEvent::VisibleMonthsChange(&[self.current_month]));
        true
    }

    pub fn add_month(&mut self, count: i32) -> bool {
        self.update_month(add_months(self.current_month, count))
    }

    fn is_selectable(&self, date: NaiveDate) -> bool {
        self.options.allow_selection_out_of_range
            || !is_date_not_in_range(date, self.options.min_date, self.options.max_date)
    }

    fn handle_day_interaction(&mut self, date: NaiveDate, long_press: bool) -> Option<String> {
        if !self.is_selectable(date) {
            debug!("ignoring interaction outside min/max: {}", date);
            return None;
        }

        if !self.options.disable_month_change {
            self.update_month(date);
        }

        let formatted = to_marking_format(date);
        let event = if long_press {
            CalendarEvent::DayLongPress(&formatted)
        } else {
            CalendarEvent::DayPress(&formatted)
        };
        self.hooks.dispatch(&event);
        Some(formatted)
    }

    /// Tap on a day. Selects it and returns the `YYYY-MM-DD` string handed to
    /// the press hooks, or `None` when the day is out of range.
    pub fn press_day(&mut self, date: NaiveDate) -> Option<String> {
        let result = self.handle_day_interaction(date, false);
        if result.is_some() {
            self.selected = Some(date);
        }
        result
    }

    pub fn long_press_day(&mut self, date: NaiveDate) -> Option<String> {
        self.handle_day_interaction(date, true)
    }

    /// Tap on the `day`-th day of the visible month.
    pub fn press_day_of_month(&mut self, day: u32) -> Option<String> {
        let date = self.current_month.with_day(day)?;
        self.press_day(date)
    }

    pub fn state_of(&self, date: NaiveDate) -> DayState {
        get_state(
            date,
            self.current_month,
            self.today,
            &self.options.state_options(self.selected),
        )
    }

    pub fn cell(&self, date: NaiveDate) -> DayCell {
        let hidden = self.options.hide_extra_days && !is_same_month(date, self.current_month);
        let state = self.state_of(date);
        let marking = if hidden {
            DayMarking::default()
        } else {
            self.markings.lookup(date)
        };

        let stamp = format_accessibility_date(self.formatter.as_ref(), date);
        let accessibility_label = day_accessibility_label(state, &stamp, &marking);

        DayCell {
            date,
            label: format!("{:02}", date.day()),
            state,
            hidden,
            marking,
            accessibility_label,
        }
    }

    /// The visible grid as rows of seven cells.
    pub fn weeks(&self) -> Vec<Vec<DayCell>> {
        self.page()
            .weeks()
            .map(|week| week.iter().map(|&date| self.cell(date)).collect())
            .collect()
    }

    pub fn header(&self) -> CalendarHeader {
        let header = &self.options.header;

        let title = header.custom_title.clone().unwrap_or_else(|| {
            format_month(
                self.formatter.as_ref(),
                self.current_month,
                FormatOptions::pattern(&header.month_format),
            )
        });

        let week_day_names = if header.hide_day_names {
            vec![String::new(); 7]
        } else {
            week_day_names(self.formatter.as_ref(), self.options.first_day)
        };

        let at_min = self
            .options
            .min_date
            .is_some_and(|min| start_of_month(min) >= self.current_month);
        let at_max = self
            .options
            .max_date
            .is_some_and(|max| start_of_month(max) <= self.current_month);

        CalendarHeader {
            title,
            year: self.current_month.year(),
            week_day_names,
            disabled_days_indexes: header.disabled_days_indexes.clone(),
            show_arrows: !header.hide_arrows,
            left_arrow_disabled: header.disable_arrow_left || at_min,
            right_arrow_disabled: header.disable_arrow_right || at_max,
        }
    }

    pub fn press_arrow_left(&mut self) -> bool {
        if self.header().left_arrow_disabled {
            return false;
        }
        self.add_month(-1)
    }

    pub fn press_arrow_right(&mut self) -> bool {
        if self.header().right_arrow_disabled {
            return false;
        }
        self.add_month(1)
    }

    /// Handle a finished horizontal touch. Swiping left shows the next month.
    pub fn swipe(&mut self, start_x: f32, end_x: f32) -> bool {
        if !self.options.enable_swipe_months {
            return false;
        }

        let detector = SwipeDetector::new(self.options.calendar_width, SWIPE_RANGE_OFFSET);
        match detector.detect(start_x, end_x) {
            Some(SwipeDirection::Left) => self.add_month(1),
            Some(SwipeDirection::Right) => self.add_month(-1),
            None => false,
        }
    }
}
