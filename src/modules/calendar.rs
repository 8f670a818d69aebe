//! Calendar page - a single day grid from 08:00 to 20:00 with a current-time line

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tracing::debug;

use crate::core::{Action, Module};
use crate::domain::CalendarEvent;

pub const DAY_START_HOUR: u32 = 8;
pub const DAY_END_HOUR: u32 = 20;
const DAY_MINUTES: u32 = (DAY_END_HOUR - DAY_START_HOUR) * 60;
const TIME_LINE_REFRESH_SECS: i64 = 60;

/// Minutes from the top of the grid, or `None` outside working hours.
pub fn time_line_offset(now: NaiveTime) -> Option<u32> {
    let hour = now.hour();
    if (DAY_START_HOUR..DAY_END_HOUR).contains(&hour) {
        Some((hour - DAY_START_HOUR) * 60 + now.minute())
    } else {
        None
    }
}

fn grid_minute(at: NaiveDateTime) -> u32 {
    let minutes = at.hour() * 60 + at.minute();
    minutes
        .saturating_sub(DAY_START_HOUR * 60)
        .min(DAY_MINUTES)
}

/// `[start, end)` of the event in grid minutes; zero-length events take one minute.
fn event_span(event: &CalendarEvent) -> (u32, u32) {
    let start = grid_minute(event.start);
    let end = grid_minute(event.end).max(start + 1);
    (start, end)
}

#[derive(Debug)]
pub struct DayCalendar {
    day: NaiveDate,
    events: Vec<CalendarEvent>,
    /// Stays `None` until the clock first falls inside working hours
    time_line: Option<u32>,
    last_refresh: Option<NaiveDateTime>,
}

impl DayCalendar {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            events: Vec::new(),
            time_line: None,
            last_refresh: None,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn set_day(&mut self, day: NaiveDate) {
        self.day = day;
    }

    pub fn load(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn time_line(&self) -> Option<u32> {
        self.time_line
    }

    /// Moves the line to `now`; outside working hours the line keeps its last spot.
    pub fn refresh_time_line(&mut self, now: NaiveTime) {
        if let Some(offset) = time_line_offset(now) {
            self.time_line = Some(offset);
        }
    }

    /// Refreshes the line on the first tick and then once a minute.
    pub fn on_tick(&mut self, now: NaiveDateTime) {
        let due = match self.last_refresh {
            None => true,
            Some(last) => (now - last).num_seconds() >= TIME_LINE_REFRESH_SECS,
        };
        if due {
            self.refresh_time_line(now.time());
            self.last_refresh = Some(now);
        }
    }

    /// Row of the grid holding `minute`, for a grid `height` rows tall.
    pub fn minute_to_row(minute: u32, height: u16) -> u16 {
        if height == 0 {
            return 0;
        }
        let row = minute.min(DAY_MINUTES) as u64 * height as u64 / DAY_MINUTES as u64;
        (row as u16).min(height - 1)
    }

    fn row_minutes(row: u16, height: u16) -> (u32, u32) {
        let height = height.max(1) as u32;
        let start = row as u32 * DAY_MINUTES / height;
        let end = (row as u32 + 1) * DAY_MINUTES / height;
        (start, end.max(start + 1))
    }

    pub fn event_at_row(&self, row: u16, height: u16) -> Option<&CalendarEvent> {
        if row >= height {
            return None;
        }
        let (row_start, row_end) = Self::row_minutes(row, height);
        self.events.iter().find(|event| {
            let (start, end) = event_span(event);
            start < row_end && end > row_start
        })
    }

    /// Mouse down on an event. Only logs; nothing moves.
    pub fn start_drag(&self, event: &CalendarEvent) {
        debug!(event_id = event.id, "Drag started");
    }

    fn grid_line(&self, row: u16, height: u16) -> Line<'_> {
        let (row_start, row_end) = Self::row_minutes(row, height);
        let hour_mark = (row_start..row_end).find(|minute| minute % 60 == 0);
        let label = match hour_mark {
            Some(minute) => format!("{:02}:00 ", DAY_START_HOUR + minute / 60),
            None => "      ".to_string(),
        };
        let mut spans = vec![Span::styled(label, Style::default().fg(Color::DarkGray))];

        if let Some(event) = self.event_at_row(row, height) {
            let (start, _) = event_span(event);
            let text = if Self::minute_to_row(start, height) == row {
                format!(
                    "{}-{} {}",
                    event.start.format("%H:%M"),
                    event.end.format("%H:%M"),
                    event.title
                )
            } else {
                "|".to_string()
            };
            spans.push(Span::styled(text, Style::default().fg(Color::Cyan)));
        }

        if self
            .time_line
            .is_some_and(|offset| Self::minute_to_row(offset, height) == row)
        {
            spans.push(Span::styled(
                " \u{2500}\u{2500} now",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Line::from(spans)
    }
}

impl Module for DayCalendar {
    fn id(&self) -> &'static str {
        "calendar"
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('a') => Action::ShowModal("event"),
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Calendar - {} ", self.day.format("%d.%m.%Y")))
            .borders(Borders::ALL);
        let height = block.inner(area).height;
        let lines: Vec<Line> = (0..height).map(|row| self.grid_line(row, height)).collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
