use crate::application::tui::Theme;
use crate::domain::{CalendarOptions, parse_date_or_warn};
use crate::infrastructure::{DEFAULT_LOG_FILTER, parse_log_filter};
use log::warn;
use std::path::PathBuf;

pub const DEFAULT_LOCALE: &str = "sv_SE";

pub struct Config {
    pub data_dir: PathBuf,
    pub markings_path: PathBuf,
    pub locale: String,
    pub first_day: i32,
    pub show_six_weeks: bool,
    pub hide_extra_days: bool,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub theme: String,
    /// `KALENDER_LOG`: a level or `RUST_LOG` style directives.
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
    /// Problems found while reading the environment. They are kept until
    /// logging is installed, see [`Config::report_warnings`].
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        let data_dir = var("KALENDER_DIR").map(PathBuf::from).unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("kalender")
        });

        let markings_path = var("KALENDER_MARKINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("markings.json"));

        let first_day = match var("KALENDER_FIRST_DAY") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "Ignoring KALENDER_FIRST_DAY={}, expected an integer",
                    raw
                ));
                1
            }),
            None => 1,
        };

        let log_filter = match var("KALENDER_LOG") {
            Some(raw) if parse_log_filter(&raw).is_some() => raw.trim().to_string(),
            Some(raw) => {
                warnings.push(format!(
                    "Ignoring KALENDER_LOG={}, expected a log level or filter directives",
                    raw
                ));
                DEFAULT_LOG_FILTER.to_string()
            }
            None => DEFAULT_LOG_FILTER.to_string(),
        };

        let available = Theme::available_themes();
        let theme = match var("KALENDER_THEME").map(|raw| raw.trim().to_lowercase()) {
            Some(name) if available.contains(&name) => name,
            Some(name) => {
                warnings.push(format!(
                    "Unknown KALENDER_THEME={}, expected one of {}",
                    name,
                    available.join(", ")
                ));
                "dark".to_string()
            }
            None => "dark".to_string(),
        };

        Self {
            markings_path,
            locale: var("KALENDER_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            first_day,
            show_six_weeks: flag(var("KALENDER_SIX_WEEKS")),
            hide_extra_days: flag(var("KALENDER_HIDE_EXTRA_DAYS")),
            min_date: var("KALENDER_MIN_DATE"),
            max_date: var("KALENDER_MAX_DATE"),
            theme,
            log_filter,
            log_file: var("KALENDER_LOG_FILE").map(PathBuf::from),
            data_dir,
            warnings,
        }
    }

    /// Emit the warnings collected by [`Config::from_vars`]. Call once logging is set up.
    pub fn report_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }

    pub fn calendar_options(&self) -> CalendarOptions {
        CalendarOptions {
            first_day: self.first_day,
            min_date: parse_date_or_warn(self.min_date.as_deref(), "minDate"),
            max_date: parse_date_or_warn(self.max_date.as_deref(), "maxDate"),
            hide_extra_days: self.hide_extra_days,
            show_six_weeks: self.show_six_weeks,
            ..CalendarOptions::default()
        }
    }
}

fn flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("yes") | Some("on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("KALENDER_DIR", "/tmp/kal")]);
        assert_eq!(config.markings_path, PathBuf::from("/tmp/kal/markings.json"));
        assert_eq!(config.locale, "sv_SE");
        assert_eq!(config.first_day, 1);
        assert!(!config.show_six_weeks);
        assert_eq!(config.log_filter, "warn");
        assert!(config.log_file.is_none());
        assert_eq!(config.theme, "dark");
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("KALENDER_MARKINGS", "/srv/markings.json"),
            ("KALENDER_LOCALE", "en_US"),
            ("KALENDER_FIRST_DAY", "0"),
            ("KALENDER_SIX_WEEKS", "true"),
            ("KALENDER_LOG", "kalender::calendar=debug,warn"),
            ("KALENDER_THEME", "Light"),
        ]);
        assert_eq!(config.markings_path, PathBuf::from("/srv/markings.json"));
        assert_eq!(config.locale, "en_US");
        assert_eq!(config.first_day, 0);
        assert!(config.show_six_weeks);
        assert_eq!(config.log_filter, "kalender::calendar=debug,warn");
        assert_eq!(config.theme, "light");
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("KALENDER_FIRST_DAY", "monday"),
            ("KALENDER_LOG", "kalender=loud"),
            ("KALENDER_SIX_WEEKS", "maybe"),
            ("KALENDER_THEME", "solarized"),
        ]);
        assert_eq!(config.first_day, 1);
        assert_eq!(config.log_filter, "warn");
        assert!(!config.show_six_weeks);
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_bad_values_are_kept_as_warnings() {
        let config = config_from(&[
            ("KALENDER_FIRST_DAY", "monday"),
            ("KALENDER_LOG", "kalender=loud"),
            ("KALENDER_THEME", "solarized"),
        ]);
        assert_eq!(config.warnings.len(), 3);
        assert_eq!(
            config.warnings[0],
            "Ignoring KALENDER_FIRST_DAY=monday, expected an integer"
        );
        assert!(config.warnings[1].starts_with("Ignoring KALENDER_LOG=kalender=loud"));
        assert_eq!(
            config.warnings[2],
            "Unknown KALENDER_THEME=solarized, expected one of dark, light, minimal"
        );
    }

    #[test]
    fn test_calendar_options() {
        let config = config_from(&[
            ("KALENDER_FIRST_DAY", "2"),
            ("KALENDER_MIN_DATE", "2023-01-10"),
            ("KALENDER_MAX_DATE", "not a date"),
            ("KALENDER_HIDE_EXTRA_DAYS", "1"),
        ]);
        let options = config.calendar_options();
        assert_eq!(options.first_day, 2);
        assert_eq!(options.min_date, NaiveDate::from_ymd_opt(2023, 1, 10));
        assert_eq!(options.max_date, None);
        assert!(options.hide_extra_days);
    }
}
