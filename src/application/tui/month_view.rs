use super::render::{day_colors, marker};
use super::theme::Theme;
use crate::domain::{Calendar, DayCell, add_days, add_months, is_same_month};
use crate::infrastructure::format_accessibility_date;
use chrono::NaiveDate;
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{self, Stdout, stdout};

/// Raw mode plus alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode();
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout())).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self { terminal })
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Result of the last press, shown under the grid.
struct Status {
    text: String,
    is_error: bool,
}

impl Status {
    fn info(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    fn error(text: String) -> Self {
        Self {
            text,
            is_error: true,
        }
    }

    fn style(&self, theme: &Theme) -> Style {
        if self.is_error {
            theme.colors.error_text.to_ratatui()
        } else {
            theme.colors.arrow.to_ratatui()
        }
    }
}

/// Interactive month grid driven by the keyboard.
pub struct MonthView {
    calendar: Calendar,
    /// Day under the keyboard cursor
    cursor: NaiveDate,
    should_exit: bool,
    show_help: bool,
    status: Option<Status>,
    theme: Theme,
}

impl MonthView {
    pub fn new(calendar: Calendar, theme: Theme) -> Self {
        let cursor = calendar
            .selected()
            .filter(|date| is_same_month(*date, calendar.current_month()))
            .unwrap_or_else(|| {
                if is_same_month(calendar.today(), calendar.current_month()) {
                    calendar.today()
                } else {
                    calendar.current_month()
                }
            });

        Self {
            calendar,
            cursor,
            should_exit: false,
            show_help: false,
            status: None,
            theme,
        }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Move the cursor, following it into another month when it leaves this one.
    fn move_cursor(&mut self, date: NaiveDate) {
        if !is_same_month(date, self.calendar.current_month()) {
            if self.calendar.options().disable_month_change {
                return;
            }
            self.calendar.update_month(date);
        }
        self.cursor = date;
    }

    fn change_month(&mut self, count: i32) {
        let moved = if count < 0 {
            self.calendar.press_arrow_left()
        } else {
            self.calendar.press_arrow_right()
        };
        if moved {
            self.cursor = add_months(self.cursor, count);
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
                self.should_exit = true;
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.should_exit = true;
            }

            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => {
                self.move_cursor(add_days(self.cursor, -1));
            }
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
                self.move_cursor(add_days(self.cursor, 1));
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.move_cursor(add_days(self.cursor, -7));
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                self.move_cursor(add_days(self.cursor, 7));
            }

            (KeyCode::PageUp, _) | (KeyCode::Char('p'), _) => self.change_month(-1),
            (KeyCode::PageDown, _) | (KeyCode::Char('n'), _) => self.change_month(1),

            (KeyCode::Char('t'), _) => {
                self.move_cursor(self.calendar.today());
            }

            (KeyCode::Enter, _) => {
                self.status = Some(match self.calendar.press_day(self.cursor) {
                    Some(date) => Status::info(format!("Selected {}", date)),
                    None => Status::error(format!(
                        "{} is outside the selectable range",
                        self.cursor
                    )),
                });
            }
            (KeyCode::Char(' '), _) => {
                self.status = self
                    .calendar
                    .long_press_day(self.cursor)
                    .map(|date| Status::info(format!("Long press {}", date)));
            }

            (KeyCode::Char('?'), _) => {
                self.show_help = !self.show_help;
            }

            _ => {}
        }
    }

    fn create_month_table(calendar: &Calendar, cursor: NaiveDate, theme: &Theme) -> Table<'static> {
        let colors = &theme.colors;
        let header = calendar.header();

        let header_row = Row::new(
            header
                .week_day_names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let pair = if header.disabled_days_indexes.contains(&i) {
                        &colors.disabled
                    } else {
                        &colors.week_day
                    };
                    Cell::from(name.clone()).style(pair.to_ratatui())
                })
                .collect::<Vec<_>>(),
        )
        .height(1);

        let rows: Vec<Row> = calendar
            .weeks()
            .into_iter()
            .map(|week| {
                let cells: Vec<Cell> = week
                    .iter()
                    .map(|cell| Self::create_day_cell(cell, cursor, theme))
                    .collect();
                Row::new(cells).height(2)
            })
            .collect();

        let arrow = |show: bool, disabled: bool, glyph: &'static str| {
            if !show || disabled { " " } else { glyph }
        };
        let title = format!(
            "{}  {} {}  {}",
            arrow(header.show_arrows, header.left_arrow_disabled, "◀"),
            header.title,
            header.year,
            arrow(header.show_arrows, header.right_arrow_disabled, "▶"),
        );

        Table::new(rows, [Constraint::Length(5); 7])
            .header(header_row)
            .block(
                Block::default()
                    .borders(Borders::NONE)
                    .title(title)
                    .title_style(colors.title.to_ratatui_with_modifier(Modifier::BOLD))
                    .title_alignment(Alignment::Center),
            )
            .column_spacing(1)
    }

    fn create_day_cell(cell: &DayCell, cursor: NaiveDate, theme: &Theme) -> Cell<'static> {
        if cell.hidden {
            return Cell::from("");
        }

        let text = format!("{}{}", cell.label, marker(cell));
        let style = if cell.date == cursor {
            theme.colors.cursor.to_ratatui_with_modifier(Modifier::BOLD)
        } else {
            day_colors(theme, cell).to_ratatui()
        };
        Cell::from(text).style(style)
    }

    fn create_detail(
        calendar: &Calendar,
        cursor: NaiveDate,
        status: Option<&Status>,
        theme: &Theme,
    ) -> Paragraph<'static> {
        let colors = &theme.colors;
        let cell = calendar.cell(cursor);

        let mut lines = vec![Line::from(vec![Span::styled(
            format_accessibility_date(calendar.formatter(), cursor),
            colors.title.to_ratatui(),
        )])];

        if !cell.accessibility_label.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                cell.accessibility_label.clone(),
                colors.help_text.to_ratatui(),
            )]));
        }

        for dot in &cell.marking.dots {
            let name = dot.key.clone().unwrap_or_else(|| dot.color.clone());
            lines.push(Line::from(vec![
                Span::styled("• ", day_colors(theme, &cell).to_ratatui()),
                Span::styled(name, colors.day.to_ratatui()),
            ]));
        }

        if let Some(status) = status {
            lines.push(Line::from(vec![Span::styled(
                status.text.clone(),
                status.style(theme),
            )]));
        }

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Left)
    }

    fn create_help_text(theme: &Theme) -> Paragraph<'static> {
        Paragraph::new(vec![Line::from(vec![Span::styled(
            "←→/hl=Day • ↑↓/jk=Week • PgUp/PgDn=Month • t=Today • Enter=Select • Space=Long press • q=Quit",
            theme.colors.help_text.to_ratatui(),
        )])])
        .block(Block::default().borders(Borders::NONE))
        .alignment(Alignment::Center)
    }

    /// Calculate centered area with both horizontal and vertical centering
    fn calculate_centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
        let width = std::cmp::min(available.width, needed_width);
        let height = std::cmp::min(available.height, needed_height);

        Rect {
            x: available.x + available.width.saturating_sub(width) / 2,
            y: available.y + available.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// Run the month view until the user quits. Returns the selected day, if any.
    pub fn run(&mut self) -> io::Result<Option<NaiveDate>> {
        let mut session = TerminalSession::enter()?;

        while !self.should_exit {
            let calendar = &self.calendar;
            let cursor = self.cursor;
            let status = self.status.as_ref();
            let show_help = self.show_help;
            let theme = &self.theme;

            session.terminal.draw(|frame| {
                const TABLE_WIDTH: u16 = 7 * 5 + 6;
                const TABLE_HEIGHT: u16 = 2 + 6 * 2;
                const DETAIL_HEIGHT: u16 = 6;
                const HELP_HEIGHT: u16 = 2;

                let help_height = if show_help { HELP_HEIGHT } else { 0 };
                let total_height = TABLE_HEIGHT + DETAIL_HEIGHT + help_height;
                let area =
                    Self::calculate_centered_area(frame.area(), TABLE_WIDTH + 20, total_height);

                let mut constraints = vec![
                    Constraint::Length(TABLE_HEIGHT),
                    Constraint::Length(DETAIL_HEIGHT),
                ];
                if show_help {
                    constraints.push(Constraint::Length(HELP_HEIGHT));
                }
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(constraints)
                    .split(area);

                frame.render_widget(Self::create_month_table(calendar, cursor, theme), chunks[0]);
                frame.render_widget(Self::create_detail(calendar, cursor, status, theme), chunks[1]);
                if show_help {
                    frame.render_widget(Self::create_help_text(theme), chunks[2]);
                }
            })?;

            if poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key);
                }
            }
        }

        session.cleanup()?;
        Ok(self.calendar.selected())
    }
}
