use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use fleetdesk::app::App;
use fleetdesk::infrastructure::{ApiClient, RuntimeBridge, RuntimeCommand, RuntimeEvent};
use fleetdesk::{config, input, logging, ui};

#[derive(Debug, Parser)]
#[command(
    name = "fleetdesk",
    version,
    about = "Fleetdesk: tasks, calendar and car fleet in the terminal"
)]
struct Args {
    /// Backend base URL (e.g. http://127.0.0.1:5000)
    #[arg(long)]
    api: Option<String>,

    /// Config file; defaults to $FLEETDESK_CONFIG or ~/.config/fleetdesk/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load(args.config.as_deref())?.with_overrides(args.api, args.log_level);
    logging::init(&config.log_level, config.log_file_path().as_deref())?;
    info!(api = %config.api_url, "starting fleetdesk");

    let client = ApiClient::new(&config.api_url, config.request_timeout())
        .context("building API client")?;
    let runtime = RuntimeBridge::new(client.clone())?;
    let app = App::new(client.base_url(), Local::now().naive_local());

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("{err:#}");
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    app.on_tick(Local::now().naive_local());

    loop {
        pump_background(&mut app, &runtime)?;
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => input::handle_key(&mut app, key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let areas = ui::layout::areas(size, app.sidebar_collapsed);
                    input::handle_mouse(&mut app, mouse, areas);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick(Local::now().naive_local());
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) -> Result<()> {
    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::DashboardLoaded { tasks, events } => app.apply_dashboard(tasks, events),
            RuntimeEvent::DashboardFailed { message } => app.apply_dashboard_error(message),
            RuntimeEvent::SaveFinished(outcome) => app.apply_save_outcome(outcome),
            RuntimeEvent::SaveFailed { message } => app.apply_save_error(message),
            RuntimeEvent::Error { message } => {
                error!(%message, "runtime worker error");
                app.set_status(message, fleetdesk::app::StatusLevel::Error);
            }
        }
    }

    if let Some(day) = app.take_reload_request() {
        app.calendar.set_day(day);
        runtime.send(RuntimeCommand::LoadDashboard { day })?;
    }
    for request in app.drain_save_requests() {
        runtime.send(RuntimeCommand::Save(request))?;
    }
    Ok(())
}
