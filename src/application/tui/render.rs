use super::theme::{ColorPair, Theme, parse_hex_color};
use crate::domain::{Calendar, CalendarList, DayCell, DayState, MonthPage};
use std::fmt::Write;

const CELL_WIDTH: usize = 4;

/// Glyph drawn after the day number for its strongest overlay.
pub fn marker(cell: &DayCell) -> char {
    let marking = &cell.marking;
    if marking.is_period_start() {
        '['
    } else if marking.is_period_end() {
        ']'
    } else if marking.period.is_some() {
        '='
    } else if marking.is_blocked() {
        'x'
    } else if !marking.dots.is_empty() {
        '•'
    } else {
        ' '
    }
}

/// Colors for a day: its state first, then its overlay.
pub fn day_colors(theme: &Theme, cell: &DayCell) -> ColorPair {
    let colors = &theme.colors;
    let marking = &cell.marking;

    match cell.state {
        DayState::Selected => return colors.selected.clone(),
        DayState::Today => return colors.today.clone(),
        DayState::Disabled => return colors.disabled.clone(),
        DayState::Default => {}
    }

    if let Some(period) = &marking.period {
        let mut pair = colors.period.clone();
        if let Some(bg) = period.colors.background_color.as_deref().and_then(parse_hex_color) {
            pair.bg = Some(bg);
        }
        return pair;
    }
    if let Some(blocked) = &marking.blocked {
        let mut pair = colors.blocked.clone();
        if let Some(bg) = blocked.colors.background_color.as_deref().and_then(parse_hex_color) {
            pair.bg = Some(bg);
        }
        return pair;
    }
    if let Some(dot) = marking.dots.first() {
        return parse_hex_color(&dot.color)
            .map(ColorPair::new)
            .unwrap_or_else(|| colors.dot.clone());
    }

    colors.day.clone()
}

/// Prints calendars as text, optionally with ANSI colors.
pub struct TextRenderer {
    theme: Theme,
    color: bool,
}

impl TextRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme, color: true }
    }

    /// No escape codes; today and selection are shown with `>` and `*`.
    pub fn plain() -> Self {
        Self {
            theme: Theme::minimal(),
            color: false,
        }
    }

    fn paint(&self, pair: &ColorPair, text: &str) -> String {
        if self.color {
            pair.colorize(text)
        } else {
            text.to_string()
        }
    }

    fn render_cell(&self, cell: &DayCell) -> String {
        if cell.hidden {
            return " ".repeat(CELL_WIDTH);
        }

        let prefix = match cell.state {
            DayState::Selected if !self.color => '*',
            DayState::Today if !self.color => '>',
            _ => ' ',
        };
        let text = format!("{}{}{}", prefix, cell.label, marker(cell));
        self.paint(&day_colors(&self.theme, cell), &text)
    }

    pub fn render_month(&self, calendar: &Calendar) -> String {
        let colors = &self.theme.colors;
        let header = calendar.header();
        let mut out = String::new();

        let width = CELL_WIDTH * 7;
        let title = format!("{} {}", header.title, header.year);
        let (left, right) = if header.show_arrows {
            let arrow = |disabled: bool, glyph: &str| {
                if disabled {
                    self.paint(&colors.arrow_disabled, " ")
                } else {
                    self.paint(&colors.arrow, glyph)
                }
            };
            (
                arrow(header.left_arrow_disabled, "<"),
                arrow(header.right_arrow_disabled, ">"),
            )
        } else {
            (" ".to_string(), " ".to_string())
        };
        let padding = width.saturating_sub(title.chars().count() + 2);
        let _ = writeln!(
            out,
            "{}{}{}{}{}",
            left,
            " ".repeat(padding / 2),
            self.paint(&colors.title, &title),
            " ".repeat(padding - padding / 2),
            right
        );

        let names: String = header
            .week_day_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let short: String = name.chars().take(CELL_WIDTH - 1).collect();
                let text = format!(" {:<width$}", short, width = CELL_WIDTH - 1);
                if header.disabled_days_indexes.contains(&i) {
                    self.paint(&colors.disabled, &text)
                } else {
                    self.paint(&colors.week_day, &text)
                }
            })
            .collect();
        let _ = writeln!(out, "{}", names.trim_end());

        for week in calendar.weeks() {
            let row: String = week.iter().map(|cell| self.render_cell(cell)).collect();
            let _ = writeln!(out, "{}", row.trim_end());
        }

        out
    }

    /// Every month the list would render around its current month.
    pub fn render_list(&self, list: &CalendarList) -> String {
        let months: Vec<String> = (0..list.items().len())
            .filter(|&index| list.is_date_in_range(list.items()[index].month))
            .filter_map(|index| list.calendar_for(index))
            .map(|calendar| self.render_month(&calendar))
            .collect();
        months.join("\n")
    }

    /// The raw page as ISO dates, one week per line.
    pub fn render_page(&self, page: &MonthPage) -> String {
        let mut out = String::new();
        for week in page.weeks() {
            let line: Vec<String> = week
                .iter()
                .map(|date| {
                    let text = date.format("%Y-%m-%d").to_string();
                    if page.is_extra_day(*date) {
                        self.paint(&self.theme.colors.extra_day, &text)
                    } else {
                        text
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }
        out
    }
}
