use crate::application::{Config, DEFAULT_LOCALE};
use crate::application::tui::{MonthView, TextRenderer, Theme};
use crate::domain::{Calendar, CalendarList, CalendarListOptions, Markings, MonthPage};
use crate::infrastructure::{
    ChronoFormatter, DateFormatter, HookRegistry, JsonFileSource, LoggingHook, MarkingSource,
};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

pub struct CalendarApp {
    config: Config,
    formatter: Arc<dyn DateFormatter>,
    markings: Markings,
    hooks: HookRegistry,
    theme: Theme,
    today: NaiveDate,
}

impl CalendarApp {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut hooks = HookRegistry::new();
        hooks.register(LoggingHook);
        Self::with_hooks(config, hooks)
    }

    pub fn with_hooks(config: Config, hooks: HookRegistry) -> anyhow::Result<Self> {
        let formatter = ChronoFormatter::from_name(&config.locale).unwrap_or_else(|| {
            warn!("Unknown locale '{}', using {}", config.locale, DEFAULT_LOCALE);
            ChronoFormatter::default()
        });

        let source = JsonFileSource::new(&config.markings_path);
        let markings = source.load_markings()?;
        info!("loaded markings from {}", source.describe());

        Ok(Self {
            theme: Theme::by_name(&config.theme),
            formatter: Arc::new(formatter),
            markings,
            hooks,
            today: Utc::now().date_naive(),
            config,
        })
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn markings(&self) -> &Markings {
        &self.markings
    }

    /// A calendar opened on `month`, or on today's month.
    pub fn calendar(&self, month: Option<NaiveDate>) -> Calendar {
        Calendar::for_month(
            month.unwrap_or(self.today),
            self.config.calendar_options(),
            self.formatter.clone(),
        )
        .with_today(self.today)
        .with_markings(self.markings.clone())
        .with_hooks(self.hooks.clone())
    }

    pub fn calendar_list(&self, month: Option<NaiveDate>, horizontal: bool) -> CalendarList {
        let current = month.unwrap_or(self.today).format("%Y-%m-%d").to_string();
        CalendarList::new(
            Some(&current),
            CalendarListOptions {
                horizontal,
                ..CalendarListOptions::default()
            },
            self.config.calendar_options(),
            self.formatter.clone(),
        )
        .with_today(self.today)
        .with_markings(self.markings.clone())
        .with_hooks(self.hooks.clone())
    }

    fn renderer(&self, plain: bool) -> TextRenderer {
        if plain {
            TextRenderer::plain()
        } else {
            TextRenderer::new(self.theme.clone())
        }
    }

    pub fn render_month(&self, month: Option<NaiveDate>, plain: bool) -> String {
        self.renderer(plain).render_month(&self.calendar(month))
    }

    pub fn render_page(&self, month: Option<NaiveDate>, plain: bool) -> String {
        let page = MonthPage::new(
            month.unwrap_or(self.today),
            self.config.first_day,
            self.config.show_six_weeks,
        );
        self.renderer(plain).render_page(&page)
    }

    pub fn render_list(&self, month: Option<NaiveDate>, horizontal: bool, plain: bool) -> String {
        self.renderer(plain)
            .render_list(&self.calendar_list(month, horizontal))
    }

    pub fn run_tui(&self, month: Option<NaiveDate>) -> anyhow::Result<Option<NaiveDate>> {
        let mut view = MonthView::new(self.calendar(month), self.theme.clone());
        Ok(view.run()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_hooks::RecordingHook;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn config_in(temp_dir: &TempDir, extra: &[(&str, &str)]) -> Config {
        let mut vars: HashMap<String, String> = extra
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        vars.insert(
            "KALENDER_DIR".to_string(),
            temp_dir.path().display().to_string(),
        );
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_app_without_markings_file() {
        let temp_dir = TempDir::new().unwrap();
        let app = CalendarApp::new(config_in(&temp_dir, &[("KALENDER_LOCALE", "en_US")]))
            .unwrap()
            .with_today(d(2023, 4, 14));

        assert!(app.markings().is_empty());
        let calendar = app.calendar(None);
        assert_eq!(calendar.current_month(), d(2023, 4, 1));
        assert_eq!(calendar.options().first_day, 1);

        let text = app.render_month(Some(d(2023, 2, 10)), true);
        assert!(text.contains("February 2023"));
    }

    #[test]
    fn test_app_loads_markings() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("markings.json"),
            r##"{"blockedDates": {"dates": ["2023-04-03"], "backgroundColor": "#D9D9D9"}}"##,
        )
        .unwrap();

        let app = CalendarApp::new(config_in(&temp_dir, &[])).unwrap();
        assert!(app.markings().lookup(d(2023, 4, 3)).is_blocked());

        let list = app.calendar_list(Some(d(2023, 4, 1)), false);
        assert!(list.markings_for(d(2023, 4, 1)).blocked.is_some());
        assert!(list.markings_for(d(2023, 5, 1)).blocked.is_none());
    }

    #[test]
    fn test_broken_markings_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("markings.json"), "[").unwrap();
        assert!(CalendarApp::new(config_in(&temp_dir, &[])).is_err());
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let app = CalendarApp::new(config_in(&temp_dir, &[("KALENDER_LOCALE", "xx_XX")])).unwrap();
        assert_eq!(app.calendar(None).formatter().locale_name(), "sv_SE");
    }

    #[test]
    fn test_hooks_reach_calendars() {
        let temp_dir = TempDir::new().unwrap();
        let recorder = Arc::new(RecordingHook::default());
        let mut hooks = HookRegistry::new();
        hooks.register_shared(recorder.clone());

        let app = CalendarApp::with_hooks(config_in(&temp_dir, &[]), hooks)
            .unwrap()
            .with_today(d(2023, 4, 14));
        let mut calendar = app.calendar(None);
        calendar.press_day(d(2023, 4, 20));

        assert_eq!(recorder.events(), vec!["press:2023-04-20"]);
    }

    #[test]
    fn test_render_page_uses_config() {
        let temp_dir = TempDir::new().unwrap();
        let app = CalendarApp::new(config_in(
            &temp_dir,
            &[("KALENDER_FIRST_DAY", "0"), ("KALENDER_SIX_WEEKS", "1")],
        ))
        .unwrap();

        let text = app.render_page(Some(d(2015, 2, 1)), true);
        assert_eq!(text.lines().count(), 6);
        assert!(text.starts_with("2015-02-01"));
        assert!(text.trim_end().ends_with("2015-03-14"));
    }
}
