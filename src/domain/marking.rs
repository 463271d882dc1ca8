use crate::domain::DateRange;
use crate::domain::date::{is_same_month, parse_date_or_warn};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Input shapes, as handed over by the host (date strings, not dates)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    #[serde(default)]
    pub key: Option<String>,
    pub color: String,
}

impl Dot {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            key: None,
            color: color.into(),
        }
    }

    pub fn with_key(key: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            color: color.into(),
        }
    }
}

/// Interaction settings shared by every overlay kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marking {
    #[serde(default)]
    pub active_opacity: Option<f32>,
    #[serde(default)]
    pub disable_touch_event: bool,
    #[serde(default)]
    pub accessibility_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkingColors {
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedMarking {
    #[serde(flatten)]
    pub marking: Marking,
    #[serde(flatten)]
    pub colors: MarkingColors,
    #[serde(default)]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotMarking {
    #[serde(flatten)]
    pub marking: Marking,
    pub date: String,
    #[serde(default)]
    pub dots: Vec<Dot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDate {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodMarking {
    #[serde(flatten)]
    pub marking: Marking,
    #[serde(flatten)]
    pub colors: MarkingColors,
    #[serde(default)]
    pub dates: Vec<PeriodDate>,
}

/// The three overlays as one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkingInput {
    #[serde(default)]
    pub blocked_dates: Option<BlockedMarking>,
    #[serde(default)]
    pub dot_dates: Vec<DotMarking>,
    #[serde(default)]
    pub period_dates: Option<PeriodMarking>,
}

// ============================================================================
// Resolved overlays
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BlockedDates {
    pub marking: Marking,
    pub colors: MarkingColors,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DotDate {
    pub marking: Marking,
    pub date: NaiveDate,
    pub dots: Vec<Dot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDay {
    pub date: NaiveDate,
    pub start: bool,
    pub end: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodDates {
    pub marking: Marking,
    pub colors: MarkingColors,
    pub dates: Vec<PeriodDay>,
}

impl BlockedMarking {
    pub fn resolve(&self) -> Option<BlockedDates> {
        let dates: Vec<NaiveDate> = self
            .dates
            .iter()
            .filter_map(|source| parse_or_log(source, "blockedDates"))
            .collect();

        if dates.is_empty() {
            return None;
        }

        Some(BlockedDates {
            marking: self.marking.clone(),
            colors: self.colors.clone(),
            dates,
        })
    }
}

impl DotMarking {
    pub fn resolve(&self) -> Option<DotDate> {
        let date = parse_or_log(&self.date, "dotDates")?;
        Some(DotDate {
            marking: self.marking.clone(),
            date,
            dots: self.dots.clone(),
        })
    }
}

impl PeriodMarking {
    /// Expand every start/end pair into one entry per covered day.
    pub fn resolve(&self) -> Option<PeriodDates> {
        let mut dates = Vec::new();

        for period in &self.dates {
            let start = parse_or_log(&period.start_date, "periodDates");
            let end = parse_or_log(&period.end_date, "periodDates");
            let (Some(start), Some(end)) = (start, end) else {
                continue;
            };

            let range = DateRange::new(start, end);
            dates.extend(range.days().map(|date| PeriodDay {
                date,
                start: date == range.start,
                end: date == range.end,
            }));
        }

        if dates.is_empty() {
            return None;
        }

        Some(PeriodDates {
            marking: self.marking.clone(),
            colors: self.colors.clone(),
            dates,
        })
    }
}

impl MarkingInput {
    pub fn resolve(&self) -> Markings {
        Markings {
            blocked: self.blocked_dates.as_ref().and_then(BlockedMarking::resolve),
            dots: self.dot_dates.iter().filter_map(DotMarking::resolve).collect(),
            periods: self.period_dates.as_ref().and_then(PeriodMarking::resolve),
        }
    }
}

fn parse_or_log(source: &str, param: &str) -> Option<NaiveDate> {
    parse_date_or_warn(Some(source), param)
}

// ============================================================================
// Per-day reconciliation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BlockedDecoration {
    pub colors: MarkingColors,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodDecoration {
    pub colors: MarkingColors,
    pub start: bool,
    pub end: bool,
}

/// Everything the overlays say about a single day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayMarking {
    pub blocked: Option<BlockedDecoration>,
    pub dots: Vec<Dot>,
    pub period: Option<PeriodDecoration>,
    pub marking: Option<Marking>,
}

impl DayMarking {
    pub fn is_empty(&self) -> bool {
        self.blocked.is_none() && self.dots.is_empty() && self.period.is_none()
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.is_some()
    }

    pub fn is_period_start(&self) -> bool {
        self.period.as_ref().is_some_and(|p| p.start)
    }

    pub fn is_period_end(&self) -> bool {
        self.period.as_ref().is_some_and(|p| p.end)
    }

    pub fn touch_disabled(&self) -> bool {
        self.marking.as_ref().is_some_and(|m| m.disable_touch_event)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markings {
    pub blocked: Option<BlockedDates>,
    pub dots: Vec<DotDate>,
    pub periods: Option<PeriodDates>,
}

impl Markings {
    pub fn is_empty(&self) -> bool {
        self.blocked.is_none() && self.dots.is_empty() && self.periods.is_none()
    }

    pub fn lookup(&self, date: NaiveDate) -> DayMarking {
        let mut day = DayMarking::default();

        if let Some(dot_date) = self.dots.iter().find(|dot_date| dot_date.date == date) {
            day.dots = dot_date
                .dots
                .iter()
                .filter(|dot| !dot.color.is_empty())
                .cloned()
                .collect();
            day.marking = Some(dot_date.marking.clone());
        }

        if let Some(blocked) = self
            .blocked
            .as_ref()
            .filter(|blocked| blocked.dates.contains(&date))
        {
            day.blocked = Some(BlockedDecoration {
                colors: blocked.colors.clone(),
            });
            day.marking = Some(blocked.marking.clone());
        }

        if let Some(periods) = &self.periods {
            if let Some(period_day) = periods.dates.iter().find(|p| p.date == date) {
                day.period = Some(PeriodDecoration {
                    colors: periods.colors.clone(),
                    start: period_day.start,
                    end: period_day.end,
                });
                day.marking = Some(periods.marking.clone());
            }
        }

        day
    }

    /// Keep each overlay only if it touches `month`.
    pub fn for_month(&self, month: NaiveDate) -> Markings {
        Markings {
            blocked: self
                .blocked
                .as_ref()
                .filter(|b| b.dates.iter().any(|&date| is_same_month(date, month)))
                .cloned(),
            dots: if self.dots.iter().any(|d| is_same_month(d.date, month)) {
                self.dots.clone()
            } else {
                Vec::new()
            },
            periods: self
                .periods
                .as_ref()
                .filter(|p| p.dates.iter().any(|day| is_same_month(day.date, month)))
                .cloned(),
        }
    }
}
