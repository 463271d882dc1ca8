use crate::domain::{DayMarking, DayState};

#[derive(Debug, Clone, Default)]
pub struct LabelOptions<'a> {
    pub accessibility_label: Option<&'a str>,
    pub is_selected: bool,
    pub is_start_day: bool,
    pub is_end_day: bool,
    pub is_period: bool,
    pub is_disabled: bool,
    pub is_blocked: bool,
}

/// Spoken description of a day's decorations. An explicit label wins.
pub fn marking_accessibility_label(options: &LabelOptions<'_>) -> String {
    if let Some(label) = options.accessibility_label {
        return label.to_string();
    }

    let parts = [
        (options.is_selected, "selected"),
        (options.is_start_day, "period start"),
        (options.is_end_day, "period end"),
        (options.is_period, "period"),
        (options.is_blocked, "blocked"),
        (options.is_disabled, "disabled"),
    ];

    parts
        .iter()
        .filter(|(flag, _)| *flag)
        .map(|(_, word)| *word)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn day_accessibility_label(
    state: DayState,
    formatted_date_stamp: &str,
    marking: &DayMarking,
) -> String {
    let prefix = if state == DayState::Today { "today" } else { "" };

    let explicit = marking
        .marking
        .as_ref()
        .and_then(|m| m.accessibility_label.as_deref());

    let marking_label = marking_accessibility_label(&LabelOptions {
        accessibility_label: explicit,
        is_selected: state == DayState::Selected,
        is_start_day: marking.is_period_start(),
        is_end_day: marking.is_period_end(),
        is_period: marking.is_period_start() && marking.is_period_end(),
        is_disabled: state.is_disabled() || marking.touch_disabled(),
        is_blocked: marking.is_blocked(),
    });

    [prefix, formatted_date_stamp, marking_label.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlockedDecoration, Marking, MarkingColors, PeriodDecoration};

    #[test]
    fn test_explicit_label_wins() {
        let options = LabelOptions {
            accessibility_label: Some("holiday"),
            is_selected: true,
            is_blocked: true,
            ..LabelOptions::default()
        };
        assert_eq!(marking_accessibility_label(&options), "holiday");
    }

    #[test]
    fn test_flags_in_order() {
        let options = LabelOptions {
            is_selected: true,
            is_start_day: true,
            is_end_day: true,
            is_period: true,
            is_blocked: true,
            is_disabled: true,
            ..LabelOptions::default()
        };
        assert_eq!(
            marking_accessibility_label(&options),
            "selected period start period end period blocked disabled"
        );
        assert_eq!(marking_accessibility_label(&LabelOptions::default()), "");
    }

    #[test]
    fn test_day_label() {
        let marking = DayMarking {
            blocked: Some(BlockedDecoration {
                colors: MarkingColors::default(),
            }),
            period: Some(PeriodDecoration {
                colors: MarkingColors::default(),
                start: true,
                end: false,
            }),
            marking: Some(Marking::default()),
            ..DayMarking::default()
        };

        assert_eq!(
            day_accessibility_label(DayState::Today, "Monday 03 April 2023", &marking),
            "today Monday 03 April 2023 period start blocked"
        );
        assert_eq!(
            day_accessibility_label(
                DayState::Disabled,
                "Saturday 01 April 2023",
                &DayMarking::default()
            ),
            "Saturday 01 April 2023 disabled"
        );
    }
}
