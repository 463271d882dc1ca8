use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;

/// Something the calendar reports to its host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalendarEvent<'a> {
    /// Day tapped; carries the `YYYY-MM-DD` date.
    DayPress(&'a str),
    DayLongPress(&'a str),
    VisibleMonthsChange(&'a [NaiveDate]),
}

/// Trait for plugins that respond to calendar interaction
pub trait CalendarHook: Send + Sync {
    fn on_event(&self, event: &CalendarEvent<'_>) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for the host callbacks a calendar fires
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn CalendarHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn register<H>(&mut self, hook: H)
    where
        H: CalendarHook + 'static,
    {
        self.hooks.push(Arc::new(hook));
    }

    pub fn register_shared(&mut self, hook: Arc<dyn CalendarHook>) {
        self.hooks.push(hook);
    }

    /// Run every hook; a failing hook is logged and the rest still run.
    pub fn dispatch(&self, event: &CalendarEvent<'_>) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_event(event) {
                warn!("Hook '{}' failed: {}", hook.name(), e);
            }
        }
    }

    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.list_hooks())
            .finish()
    }
}

/// Writes every interaction to the log.
pub struct LoggingHook;

impl CalendarHook for LoggingHook {
    fn on_event(&self, event: &CalendarEvent<'_>) -> Result<()> {
        match event {
            CalendarEvent::DayPress(date) => info!("day pressed: {}", date),
            CalendarEvent::DayLongPress(date) => info!("day long-pressed: {}", date),
            CalendarEvent::VisibleMonthsChange(months) => {
                let months: Vec<String> = months.iter().map(|m| m.format("%Y-%m").to_string()).collect();
                info!("visible months: {}", months.join(", "));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Logging"
    }
}


#[cfg(test)]
mod tests {
    use super::test_hooks::*;
    use super::*;

    #[test]
    fn test_dispatch_reaches_all_hooks() {
        let recorder = Arc::new(RecordingHook::default());
        let mut registry = HookRegistry::new();
        registry.register(FailingHook);
        registry.register_shared(recorder.clone());

        registry.dispatch(&CalendarEvent::DayPress("2023-04-03"));
        registry.dispatch(&CalendarEvent::DayLongPress("2023-04-04"));

        assert_eq!(recorder.events(), vec!["press:2023-04-03", "long:2023-04-04"]);
        assert_eq!(registry.list_hooks(), vec!["Failing", "Recording"]);
    }

    #[test]
    fn test_cloned_registry_shares_hooks() {
        let recorder = Arc::new(RecordingHook::default());
        let mut registry = HookRegistry::new();
        registry.register_shared(recorder.clone());

        let copy = registry.clone();
        let month = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        copy.dispatch(&CalendarEvent::VisibleMonthsChange(&[month]));

        assert_eq!(recorder.events(), vec!["months:2023-05"]);
        assert!(!registry.is_empty());
        assert!(HookRegistry::default().is_empty());
    }
}
