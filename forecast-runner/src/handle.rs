//! Handle to a forecast run executing on a background task

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::error::RunError;
use crate::runner::ForecastRun;
use crate::state::{RunPhase, RunState};

/// Owner of a spawned forecast run
///
/// Dropping the handle cancels the run, aborts its task and publishes
/// [`RunPhase::Aborted`] to subscribers of an unfinished run. No status request
/// is issued after teardown.
pub struct RunHandle {
    state: Arc<watch::Sender<RunState>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<Result<ForecastRun, RunError>>>,
}

impl RunHandle {
    pub(crate) fn new(
        state: Arc<watch::Sender<RunState>>,
        cancel: CancellationToken,
        task: JoinHandle<Result<ForecastRun, RunError>>,
    ) -> Self {
        Self {
            state,
            cancel,
            task: Some(task),
        }
    }

    /// Latest state of the run
    pub fn state(&self) -> RunState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    /// Tears the run down; it ends with [`RunError::Aborted`]
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the run to end
    pub async fn wait(mut self) -> Result<ForecastRun, RunError> {
        let Some(task) = self.task.take() else {
            return Err(RunError::Aborted);
        };

        match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(RunError::Aborted),
            Err(e) => {
                error!("Forecast run task panicked: {}", e);
                Err(RunError::Internal(e.to_string()))
            }
        }
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }

        self.state.send_if_modified(|s| {
            if s.phase.is_finished() {
                return false;
            }
            s.phase = RunPhase::Aborted;
            true
        });
    }
}
