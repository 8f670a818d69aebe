//! Async worker - runs in Tokio runtime and handles backend calls

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::future::try_join;
use tokio::time::interval;
use tracing::{debug, error, warn};

use crate::infrastructure::api::ApiClient;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};
use crate::modules::FormSubmitController;

const COMMAND_POLL: Duration = Duration::from_millis(25);

/// Run the async worker loop until shutdown or until the UI side hangs up.
///
/// Every command gets its own task, so a slow save never holds up a load and
/// saves finish in whatever order the backend answers them.
pub async fn run_async_worker(
    client: ApiClient,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    let controller = Arc::new(FormSubmitController::new(client.clone()));
    let mut poll_interval = interval(COMMAND_POLL);

    loop {
        loop {
            let cmd = match cmd_rx.try_recv() {
                Ok(cmd) => cmd,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            };

            match cmd {
                RuntimeCommand::Shutdown => {
                    debug!("runtime worker shutting down");
                    return Ok(());
                }

                RuntimeCommand::LoadDashboard { day } => {
                    let client = client.clone();
                    let evt_tx = evt_tx.clone();
                    tokio::spawn(async move {
                        let event =
                            match try_join(client.fetch_tasks(), client.fetch_events(day)).await {
                                Ok((tasks, events)) => {
                                    RuntimeEvent::DashboardLoaded { tasks, events }
                                }
                                Err(err) => {
                                    warn!(%err, %day, "dashboard load failed");
                                    RuntimeEvent::DashboardFailed {
                                        message: err.to_string(),
                                    }
                                }
                            };
                        let _ = evt_tx.send(event);
                    });
                }

                RuntimeCommand::Save(request) => {
                    let controller = Arc::clone(&controller);
                    let evt_tx = evt_tx.clone();
                    tokio::spawn(async move {
                        let event = match controller.dispatch(&request).await {
                            Ok(outcome) => RuntimeEvent::SaveFinished(outcome),
                            Err(err) => {
                                error!(%err, path = %request.path(), "car save got no response");
                                RuntimeEvent::SaveFailed {
                                    message: err.to_string(),
                                }
                            }
                        };
                        let _ = evt_tx.send(event);
                    });
                }
            }
        }

        poll_interval.tick().await;
    }
}
