use crate::domain::page::normalize_first_day;
use chrono::{Locale, NaiveDate, NaiveTime, TimeZone, Utc};

pub const DEFAULT_DAY_PATTERN: &str = "%A";
pub const DEFAULT_MONTH_PATTERN: &str = "%b";
pub const ACCESSIBILITY_DATE_PATTERN: &str = "%A %d %B %Y";

/// Turns dates into localized text. Patterns use strftime syntax.
pub trait DateFormatter: Send + Sync {
    fn format(&self, date: NaiveDate, pattern: &str) -> String;

    fn locale_name(&self) -> String;
}

/// Formatter backed by chrono's locale tables.
#[derive(Debug, Clone, Copy)]
pub struct ChronoFormatter {
    locale: Locale,
}

impl ChronoFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        parse_locale(name).map(Self::new)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl Default for ChronoFormatter {
    fn default() -> Self {
        Self::new(Locale::sv_SE)
    }
}

impl DateFormatter for ChronoFormatter {
    fn format(&self, date: NaiveDate, pattern: &str) -> String {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
        midnight.format_localized(pattern, self.locale).to_string()
    }

    fn locale_name(&self) -> String {
        format!("{:?}", self.locale)
    }
}

/// Accepts `sv`, `sv_SE` and `sv-SE` style names for the supported locales.
pub fn parse_locale(name: &str) -> Option<Locale> {
    let normalized = name.trim().replace('-', "_");
    let locale = match normalized.as_str() {
        "sv" | "sv_SE" => Locale::sv_SE,
        "en" | "en_US" => Locale::en_US,
        "en_GB" => Locale::en_GB,
        "de" | "de_DE" => Locale::de_DE,
        "fr" | "fr_FR" => Locale::fr_FR,
        "es" | "es_ES" => Locale::es_ES,
        "fi" | "fi_FI" => Locale::fi_FI,
        "da" | "da_DK" => Locale::da_DK,
        "nb" | "nb_NO" => Locale::nb_NO,
        "nl" | "nl_NL" => Locale::nl_NL,
        _ => return None,
    };
    Some(locale)
}

#[derive(Debug, Clone, Copy)]
pub struct FormatOptions<'a> {
    pub pattern: Option<&'a str>,
    /// Some locales lowercase day and month names.
    pub capitalize_first_letter: bool,
}

impl Default for FormatOptions<'_> {
    fn default() -> Self {
        Self {
            pattern: None,
            capitalize_first_letter: true,
        }
    }
}

impl<'a> FormatOptions<'a> {
    pub fn pattern(pattern: &'a str) -> Self {
        Self {
            pattern: Some(pattern),
            ..Self::default()
        }
    }
}

pub fn format_day(formatter: &dyn DateFormatter, date: NaiveDate, options: FormatOptions<'_>) -> String {
    let formatted = formatter.format(date, options.pattern.unwrap_or(DEFAULT_DAY_PATTERN));
    if options.capitalize_first_letter {
        capitalize_first_letter(&formatted)
    } else {
        formatted
    }
}

pub fn format_month(
    formatter: &dyn DateFormatter,
    date: NaiveDate,
    options: FormatOptions<'_>,
) -> String {
    let formatted = formatter.format(date, options.pattern.unwrap_or(DEFAULT_MONTH_PATTERN));
    if options.capitalize_first_letter {
        capitalize_first_letter(&formatted)
    } else {
        formatted
    }
}

pub fn capitalize_first_letter(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `YYYY-MM-DD`, the format callbacks and marking files use.
pub fn to_marking_format(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_accessibility_date(formatter: &dyn DateFormatter, date: NaiveDate) -> String {
    formatter.format(date, ACCESSIBILITY_DATE_PATTERN)
}

/// Short weekday names, rotated so the list begins at `first_day`.
pub fn week_day_names(formatter: &dyn DateFormatter, first_day: i32) -> Vec<String> {
    // 2023-04-02 is a Sunday.
    let Some(sunday) = NaiveDate::from_ymd_opt(2023, 4, 2) else {
        return Vec::new();
    };

    let mut names: Vec<String> = sunday
        .iter_days()
        .take(7)
        .map(|date| format_day(formatter, date, FormatOptions::pattern("%a")))
        .collect();

    names.rotate_left(normalize_first_day(first_day) as usize);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn english() -> ChronoFormatter {
        ChronoFormatter::new(Locale::en_US)
    }

    #[test]
    fn test_format_day_in_swedish_by_default() {
        let formatter = ChronoFormatter::default();
        assert_eq!(format_day(&formatter, d(2023, 3, 27), FormatOptions::default()), "Måndag");
        assert_eq!(
            format_day(
                &formatter,
                d(2023, 3, 27),
                FormatOptions {
                    capitalize_first_letter: false,
                    ..FormatOptions::default()
                }
            ),
            "måndag"
        );
    }

    #[test]
    fn test_format_day_with_locale_and_pattern() {
        let formatter = english();
        assert_eq!(format_day(&formatter, d(2023, 3, 27), FormatOptions::default()), "Monday");
        assert_eq!(format_day(&formatter, d(2023, 3, 27), FormatOptions::pattern("%a")), "Mon");
    }

    #[test]
    fn test_format_month() {
        let formatter = english();
        assert_eq!(format_month(&formatter, d(2023, 3, 27), FormatOptions::default()), "Mar");
        assert_eq!(format_month(&formatter, d(2023, 3, 27), FormatOptions::pattern("%B")), "March");

        let swedish = ChronoFormatter::default();
        assert_eq!(format_month(&swedish, d(2023, 3, 27), FormatOptions::pattern("%B")), "Mars");
    }

    #[test]
    fn test_format_month_in_swedish_by_default() {
        // chrono's Swedish abbreviations are three letters, so March is "Mar", not "Mars".
        let swedish = ChronoFormatter::default();
        assert_eq!(format_month(&swedish, d(2023, 3, 27), FormatOptions::default()), "Mar");
        assert_eq!(format_month(&swedish, d(2023, 5, 2), FormatOptions::default()), "Maj");
        assert_eq!(format_month(&swedish, d(2023, 10, 2), FormatOptions::default()), "Okt");
        assert_eq!(
            format_month(
                &swedish,
                d(2023, 10, 2),
                FormatOptions {
                    capitalize_first_letter: false,
                    ..FormatOptions::default()
                }
            ),
            "okt"
        );
    }

    #[test]
    fn test_marking_format() {
        assert_eq!(to_marking_format(d(2023, 4, 1)), "2023-04-01");
    }

    #[test]
    fn test_accessibility_date() {
        assert_eq!(
            format_accessibility_date(&english(), d(2023, 4, 3)),
            "Monday 03 April 2023"
        );
    }

    #[test]
    fn test_week_day_names_rotate() {
        let formatter = english();
        assert_eq!(
            week_day_names(&formatter, 0),
            vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert_eq!(
            week_day_names(&formatter, 1),
            vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
        assert_eq!(week_day_names(&formatter, 9)[0], "Tue");
    }

    #[test]
    fn test_parse_locale() {
        assert!(matches!(parse_locale("sv"), Some(Locale::sv_SE)));
        assert!(matches!(parse_locale("en-GB"), Some(Locale::en_GB)));
        assert!(parse_locale("xx").is_none());
        assert!(ChronoFormatter::from_name("klingon").is_none());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize_first_letter("ärlig"), "Ärlig");
        assert_eq!(capitalize_first_letter(""), "");
    }
}
