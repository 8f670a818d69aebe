use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{error, info, warn};

use crate::core::{Action, NotifyLevel};
use crate::domain::{CalendarEvent, SaveOutcome, SaveRequest, Task};
use crate::modules::fleet::{self, CarDialog, ViewHandle};
use crate::modules::{DayCalendar, TaskBoard};

pub const NOTIFICATIONS_MESSAGE: &str = "Уведомления будут реализованы позже";
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Pages listed in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Tasks,
    Calendar,
    Fleet,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Overview, Page::Tasks, Page::Calendar, Page::Fleet];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Tasks => "Tasks",
            Page::Calendar => "Calendar",
            Page::Fleet => "Fleet",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Page::Overview => '1',
            Page::Tasks => '2',
            Page::Calendar => '3',
            Page::Fleet => '4',
        }
    }

    pub fn from_shortcut(key: char) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.shortcut() == key)
    }

    pub fn has_tabs(&self) -> bool {
        matches!(self, Page::Tasks)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// Everything the UI thread knows. Network work is requested through the
/// `take_*`/`drain_*` queues and answered through the `apply_*` methods.
pub struct App {
    pub page: Page,
    pub sidebar_collapsed: bool,
    pub input_mode: InputMode,
    pub search: String,
    pub tasks: TaskBoard,
    pub calendar: DayCalendar,
    pub car_dialog: Option<CarDialog>,
    /// Blocking notifications, oldest first; each needs its own dismissal
    pub alerts: VecDeque<String>,
    pub api_endpoint: String,
    pub clock: NaiveDateTime,
    pub loading: bool,
    pub saves_in_flight: usize,
    pub status: Option<StatusMessage>,
    pub help_open: bool,
    pub should_quit: bool,
    pending_reload: bool,
    pending_saves: Vec<SaveRequest>,
}

impl App {
    /// Starts with a dashboard load already queued.
    pub fn new(api_endpoint: impl Into<String>, now: NaiveDateTime) -> Self {
        Self {
            page: Page::Overview,
            sidebar_collapsed: false,
            input_mode: InputMode::Normal,
            search: String::new(),
            tasks: TaskBoard::new(),
            calendar: DayCalendar::new(now.date()),
            car_dialog: None,
            alerts: VecDeque::new(),
            api_endpoint: api_endpoint.into(),
            clock: now,
            loading: true,
            saves_in_flight: 0,
            status: None,
            help_open: false,
            should_quit: false,
            pending_reload: true,
            pending_saves: Vec::new(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.date()
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self, now: NaiveDateTime) {
        self.clock = now;
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
        self.calendar.on_tick(now);
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    pub fn show_notifications(&mut self) {
        self.alert(NOTIFICATIONS_MESSAGE);
    }

    pub fn enter_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Leaves search mode; the typed text stays in the box.
    pub fn exit_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Reports the query and empties the box. An empty query is reported too.
    pub fn submit_search(&mut self) {
        let query = std::mem::take(&mut self.search);
        self.alert(&format!("Поиск: {query}"));
    }

    pub fn open_car_dialog(&mut self) {
        self.car_dialog = Some(CarDialog::new());
    }

    /// Queues a save of the open dialog. The dialog stays open until the
    /// backend accepts the car.
    pub fn submit_car(&mut self) {
        let Some(dialog) = self.car_dialog.as_ref() else {
            return;
        };
        match fleet::prepare(dialog) {
            Ok(request) => {
                info!(method = %request.method(), path = %request.path(), "queueing car save");
                self.pending_saves.push(request);
                self.saves_in_flight += 1;
                self.set_status("Saving car…", StatusLevel::Info);
            }
            Err(err) => {
                error!(%err, "car form incomplete");
                self.set_status(err.to_string(), StatusLevel::Error);
            }
        }
    }

    /// Routes what a page asked for.
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Notify(text, level) => self.set_status(text, level.into()),
            Action::ShowModal(id) => self.show_modal(id),
            Action::OpenCarDialog => self.open_car_dialog(),
            Action::SubmitCar => self.submit_car(),
            Action::CloseDialog => self.close_dialog(),
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn take_reload_request(&mut self) -> Option<NaiveDate> {
        if std::mem::take(&mut self.pending_reload) {
            Some(self.today())
        } else {
            None
        }
    }

    pub fn drain_save_requests(&mut self) -> Vec<SaveRequest> {
        std::mem::take(&mut self.pending_saves)
    }

    pub fn apply_dashboard(&mut self, tasks: Vec<Task>, events: Vec<CalendarEvent>) {
        self.loading = false;
        self.set_status(
            format!("Loaded {} tasks, {} events", tasks.len(), events.len()),
            StatusLevel::Info,
        );
        self.tasks.load(tasks);
        self.calendar.load(events);
    }

    pub fn apply_dashboard_error(&mut self, message: String) {
        self.loading = false;
        warn!(%message, "dashboard load failed");
        self.set_status(format!("Load failed: {message}"), StatusLevel::Error);
    }

    pub fn apply_save_outcome(&mut self, outcome: SaveOutcome) {
        self.saves_in_flight = self.saves_in_flight.saturating_sub(1);
        if outcome.is_saved() {
            self.set_status("Car saved", StatusLevel::Info);
        }
        fleet::reconcile(outcome, self);
    }

    /// The request never got an answer. Not a rejection, so no alert.
    pub fn apply_save_error(&mut self, message: String) {
        self.saves_in_flight = self.saves_in_flight.saturating_sub(1);
        self.set_status(format!("Save failed: {message}"), StatusLevel::Error);
    }
}

impl ViewHandle for App {
    fn close_dialog(&mut self) {
        self.car_dialog = None;
    }

    /// Like a page reload: the page and the endpoint survive, the rest starts over.
    fn reload(&mut self) {
        info!("reloading dashboard");
        self.sidebar_collapsed = false;
        self.input_mode = InputMode::Normal;
        self.search.clear();
        self.tasks = TaskBoard::new();
        self.calendar = DayCalendar::new(self.today());
        self.car_dialog = None;
        self.help_open = false;
        self.loading = true;
        self.pending_reload = true;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push_back(message.to_string());
    }
}
