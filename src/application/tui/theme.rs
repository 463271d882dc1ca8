use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Header
    pub title: ColorPair,
    pub week_day: ColorPair,
    pub arrow: ColorPair,
    pub arrow_disabled: ColorPair,

    // Day states
    pub day: ColorPair,
    pub today: ColorPair,
    pub selected: ColorPair,
    pub disabled: ColorPair,
    pub extra_day: ColorPair,
    pub cursor: ColorPair,

    // Overlays, used when a marking carries no color of its own
    pub blocked: ColorPair,
    pub period: ColorPair,
    pub dot: ColorPair,

    // Text
    pub help_text: ColorPair,
    pub error_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Convert to ratatui style
    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(crossterm_to_ratatui(bg));
        }
        style
    }

    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }

    /// Apply color to text for terminal output
    pub fn colorize(&self, text: &str) -> String {
        let mut styled = text.with(self.fg);
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }
}

pub fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
    match color {
        CrosstermColor::Black => RatatuiColor::Black,
        CrosstermColor::DarkRed => RatatuiColor::Red,
        CrosstermColor::DarkGreen => RatatuiColor::Green,
        CrosstermColor::DarkYellow => RatatuiColor::Yellow,
        CrosstermColor::DarkBlue => RatatuiColor::Blue,
        CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
        CrosstermColor::DarkCyan => RatatuiColor::Cyan,
        CrosstermColor::Grey => RatatuiColor::Gray,
        CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
        CrosstermColor::Red => RatatuiColor::LightRed,
        CrosstermColor::Green => RatatuiColor::LightGreen,
        CrosstermColor::Yellow => RatatuiColor::LightYellow,
        CrosstermColor::Blue => RatatuiColor::LightBlue,
        CrosstermColor::Magenta => RatatuiColor::LightMagenta,
        CrosstermColor::Cyan => RatatuiColor::LightCyan,
        CrosstermColor::White => RatatuiColor::White,
        CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
        CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
        _ => RatatuiColor::White,
    }
}

/// Parse a marking color such as `#EF7646` or `#fff`.
pub fn parse_hex_color(value: &str) -> Option<CrosstermColor> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        6 => Some(CrosstermColor::Rgb {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        3 => {
            let expand = |s: &str| channel(s).map(|v| v * 17);
            Some(CrosstermColor::Rgb {
                r: expand(&hex[0..1])?,
                g: expand(&hex[1..2])?,
                b: expand(&hex[2..3])?,
            })
        }
        _ => None,
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> CrosstermColor {
    CrosstermColor::Rgb { r, g, b }
}

const ORANGE: CrosstermColor = rgb(0xEF, 0x76, 0x46);
const ORANGE_FADED: CrosstermColor = rgb(0xFE, 0xE3, 0xD8);
const GREEN: CrosstermColor = rgb(0x48, 0x9F, 0x70);
const GREEN_FADED: CrosstermColor = rgb(0xE0, 0xED, 0xE6);
const GREY_DARK: CrosstermColor = rgb(0xA7, 0xA7, 0xA7);
const GREY_REGULAR: CrosstermColor = rgb(0xC0, 0xC0, 0xC0);
const GREY_LIGHT: CrosstermColor = rgb(0xD9, 0xD9, 0xD9);
const BLACK: CrosstermColor = rgb(0x24, 0x23, 0x24);

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                title: ColorPair::new(CrosstermColor::White),
                week_day: ColorPair::new(GREY_REGULAR),
                arrow: ColorPair::new(ORANGE),
                arrow_disabled: ColorPair::new(CrosstermColor::DarkGrey),

                day: ColorPair::new(CrosstermColor::White),
                today: ColorPair::new(ORANGE),
                selected: ColorPair::with_bg(BLACK, ORANGE),
                disabled: ColorPair::new(CrosstermColor::DarkGrey),
                extra_day: ColorPair::new(GREY_DARK),
                cursor: ColorPair::with_bg(CrosstermColor::White, rgb(60, 60, 60)),

                blocked: ColorPair::with_bg(GREY_DARK, rgb(40, 40, 40)),
                period: ColorPair::with_bg(CrosstermColor::White, GREEN),
                dot: ColorPair::new(GREEN),

                help_text: ColorPair::new(GREY_DARK),
                error_text: ColorPair::new(CrosstermColor::Red),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                title: ColorPair::new(BLACK),
                week_day: ColorPair::new(GREY_DARK),
                arrow: ColorPair::new(ORANGE),
                arrow_disabled: ColorPair::new(GREY_LIGHT),

                day: ColorPair::new(BLACK),
                today: ColorPair::new(ORANGE),
                selected: ColorPair::with_bg(BLACK, ORANGE_FADED),
                disabled: ColorPair::new(GREY_REGULAR),
                extra_day: ColorPair::new(GREY_LIGHT),
                cursor: ColorPair::with_bg(BLACK, GREY_LIGHT),

                blocked: ColorPair::with_bg(GREY_DARK, rgb(0xF4, 0xF4, 0xF4)),
                period: ColorPair::with_bg(BLACK, GREEN_FADED),
                dot: ColorPair::new(GREEN),

                help_text: ColorPair::new(GREY_DARK),
                error_text: ColorPair::new(CrosstermColor::DarkRed),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                title: ColorPair::new(CrosstermColor::White),
                week_day: ColorPair::new(CrosstermColor::Grey),
                arrow: ColorPair::new(CrosstermColor::White),
                arrow_disabled: ColorPair::new(CrosstermColor::DarkGrey),

                day: ColorPair::new(CrosstermColor::White),
                today: ColorPair::new(CrosstermColor::White),
                selected: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                disabled: ColorPair::new(CrosstermColor::DarkGrey),
                extra_day: ColorPair::new(CrosstermColor::DarkGrey),
                cursor: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkGrey),

                blocked: ColorPair::new(CrosstermColor::DarkGrey),
                period: ColorPair::new(CrosstermColor::White),
                dot: ColorPair::new(CrosstermColor::White),

                help_text: ColorPair::new(CrosstermColor::Grey),
                error_text: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#EF7646"),
            Some(CrosstermColor::Rgb { r: 0xEF, g: 0x76, b: 0x46 })
        );
        assert_eq!(
            parse_hex_color("#fff"),
            Some(CrosstermColor::Rgb { r: 255, g: 255, b: 255 })
        );
        assert_eq!(parse_hex_color("blue"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn test_by_name_falls_back_to_dark() {
        assert_eq!(Theme::by_name("LIGHT").name, "Light");
        assert_eq!(Theme::by_name("minimal").name, "Minimal");
        assert_eq!(Theme::by_name("solarized").name, "Dark");
        assert_eq!(Theme::available_themes().len(), 3);
    }

    #[test]
    fn test_ratatui_conversion() {
        let style = ColorPair::with_bg(CrosstermColor::White, GREEN).to_ratatui();
        assert_eq!(style.fg, Some(RatatuiColor::White));
        assert_eq!(style.bg, Some(RatatuiColor::Rgb(0x48, 0x9F, 0x70)));
    }
}
