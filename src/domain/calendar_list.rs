use crate::domain::calendar::{Calendar, CalendarOptions, DEFAULT_CALENDAR_WIDTH};
use crate::domain::date::{
    add_months, get_difference_in_month, is_same_month, parse_date_or_warn, start_of_month,
};
use crate::domain::marking::Markings;
use crate::domain::page::MonthPage;
use crate::infrastructure::{CalendarEvent, DateFormatter, HookRegistry, to_marking_format};
use chrono::{NaiveDate, Utc};
use log::debug;
use std::sync::Arc;

pub const PAST_SCROLL_RANGE: u32 = 6;
pub const FUTURE_SCROLL_RANGE: u32 = 6;
pub const CALENDAR_HEIGHT: f32 = 560.0;
pub const WEEK_HEIGHT: f32 = 46.0;
/// Months prepended per pull-to-refresh.
pub const REFRESH_MONTHS: i32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarListOptions {
    pub past_scroll_range: u32,
    pub future_scroll_range: u32,
    pub calendar_width: f32,
    pub calendar_height: f32,
    pub horizontal: bool,
    pub week_height: f32,
}

impl Default for CalendarListOptions {
    fn default() -> Self {
        Self {
            past_scroll_range: PAST_SCROLL_RANGE,
            future_scroll_range: FUTURE_SCROLL_RANGE,
            calendar_width: DEFAULT_CALENDAR_WIDTH,
            calendar_height: CALENDAR_HEIGHT,
            horizontal: false,
            week_height: WEEK_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthItem {
    pub month: NaiveDate,
    pub key: String,
}

impl MonthItem {
    fn new(month: NaiveDate) -> Self {
        Self {
            month,
            key: to_marking_format(month),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLayout {
    pub length: f32,
    pub offset: f32,
    pub index: usize,
}

/// A scrollable run of months around an initial month.
pub struct CalendarList {
    initial_month: NaiveDate,
    current_month: NaiveDate,
    items: Vec<MonthItem>,
    options: CalendarListOptions,
    calendar: CalendarOptions,
    markings: Markings,
    formatter: Arc<dyn DateFormatter>,
    hooks: HookRegistry,
    today: NaiveDate,
}

impl CalendarList {
    pub fn new(
        current: Option<&str>,
        options: CalendarListOptions,
        calendar: CalendarOptions,
        formatter: Arc<dyn DateFormatter>,
    ) -> Self {
        let today = Utc::now().date_naive();
        let initial_month = start_of_month(parse_date_or_warn(current, "current").unwrap_or(today));

        let past = options.past_scroll_range as i32;
        let future = options.future_scroll_range as i32;
        let items = (-past..=future)
            .map(|offset| MonthItem::new(add_months(initial_month, offset)))
            .collect();

        Self {
            initial_month,
            current_month: initial_month,
            items,
            options,
            calendar,
            markings: Markings::default(),
            formatter,
            hooks: HookRegistry::new(),
            today,
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

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    pub fn items(&self) -> &[MonthItem] {
        &self.items
    }

    pub fn initial_month(&self) -> NaiveDate {
        self.initial_month
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn initial_index(&self) -> usize {
        self.index_of(self.initial_month).unwrap_or(0)
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.items
            .iter()
            .position(|item| is_same_month(item.month, date))
    }

    /// Extent of one month along the scroll axis.
    pub fn calendar_size(&self) -> f32 {
        if self.options.horizontal {
            self.options.calendar_width
        } else {
            self.options.calendar_height
        }
    }

    /// Months on each side of the current one that are rendered eagerly.
    pub fn visible_range(&self) -> i32 {
        if self.options.horizontal { 1 } else { 3 }
    }

    pub fn item_layout(&self, index: usize) -> ItemLayout {
        let length = self.calendar_size();
        ItemLayout {
            length,
            offset: length * index as f32,
            index,
        }
    }

    /// Scroll offset that brings `date`'s month to the top.
    pub fn scroll_to_month(&self, date: NaiveDate, offset: f32) -> f32 {
        let size = self.calendar_size();
        let difference = get_difference_in_month(self.initial_month, date);
        size * self.initial_index() as f32 + difference as f32 * size + offset
    }

    /// Like `scroll_to_month`, but vertical lists also skip down to `date`'s week row.
    pub fn scroll_to_day(&self, date: NaiveDate, offset: f32) -> f32 {
        let mut amount = self.scroll_to_month(date, offset);

        if !self.options.horizontal {
            let page = MonthPage::new(date, self.calendar.first_day, self.calendar.show_six_weeks);
            if let Some(week) = page.week_index_of(date) {
                amount += self.options.week_height * week as f32;
            }
        }

        amount
    }

    /// Feed the months currently on screen, first one on top.
    /// Returns whether the current month changed.
    pub fn on_viewable_items_changed(&mut self, visible: &[NaiveDate]) -> bool {
        let Some(&first) = visible.first() else {
            return false;
        };

        let month = start_of_month(first);
        if month == self.current_month {
            return false;
        }

        self.current_month = month;
        debug!("list scrolled to {}", month.format("%Y-%m"));
        self.hooks
            .dispatch(&CalendarEvent::VisibleMonthsChange(&[self.current_month]));
        true
    }

    pub fn is_date_in_range(&self, date: NaiveDate) -> bool {
        let range = self.visible_range();
        (-range..=range).any(|i| is_same_month(date, add_months(self.current_month, i)))
    }

    /// Prepend earlier months and return the offset that keeps the current
    /// month in place.
    pub fn refresh(&mut self) -> f32 {
        let Some(first) = self.items.first().map(|item| item.month) else {
            return 0.0;
        };

        let mut items: Vec<MonthItem> = (1..=REFRESH_MONTHS)
            .rev()
            .map(|i| MonthItem::new(add_months(first, -i)))
            .collect();
        items.append(&mut self.items);
        self.items = items;

        let index = self.index_of(self.current_month).unwrap_or(0);
        self.item_layout(index).offset
    }

    pub fn markings_for(&self, month: NaiveDate) -> Markings {
        self.markings.for_month(month)
    }

    /// A month calendar for the list item at `index`.
    pub fn calendar_for(&self, index: usize) -> Option<Calendar> {
        let item = self.items.get(index)?;
        let calendar = Calendar::for_month(item.month, self.calendar.clone(), self.formatter.clone())
            .with_today(self.today)
            .with_markings(self.markings_for(item.month))
            .with_hooks(self.hooks.clone());
        Some(calendar)
    }
}
