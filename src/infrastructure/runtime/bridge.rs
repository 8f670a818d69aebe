//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The UI thread owns all state and never awaits; it sends commands over a
//! std channel and drains events once per loop iteration.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use chrono::NaiveDate;
use tokio::runtime::Runtime;

use crate::domain::{CalendarEvent, SaveOutcome, SaveRequest, Task};
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Fetch tasks and the given day's events
    LoadDashboard { day: NaiveDate },
    /// Send one car save; each runs on its own task
    Save(SaveRequest),
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    DashboardLoaded {
        tasks: Vec<Task>,
        events: Vec<CalendarEvent>,
    },
    DashboardFailed { message: String },
    /// The backend answered a save
    SaveFinished(SaveOutcome),
    /// A save got no answer
    SaveFailed { message: String },
    /// Error occurred
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    pub fn new(client: ApiClient) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let rt = Runtime::new()?;
        thread::Builder::new()
            .name("fleetdesk-runtime".to_string())
            .spawn(move || {
                rt.block_on(async {
                    if let Err(err) = run_async_worker(client, cmd_rx, evt_tx.clone()).await {
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Worker exited: {:#}", err),
                        });
                    }
                });
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
