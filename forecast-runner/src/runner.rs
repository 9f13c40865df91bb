//! Forecast job runner
//!
//! Submits a forecast job, polls it to a terminal status within the configured
//! timeout, and fetches its results once it completes.

use forecast_client::ForecastApi;
use forecast_core::domain::job::ForecastJob;
use forecast_core::domain::results::ForecastResults;
use forecast_core::dto::job::CreateForecastJob;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::RunnerConfig;
use crate::error::RunError;
use crate::handle::RunHandle;
use crate::scheduler::StatusPoller;
use crate::state::{RunPhase, RunState};

/// Outcome of a successful forecast run
#[derive(Debug, Clone)]
pub struct ForecastRun {
    /// Final job state, always `completed`
    pub job: ForecastJob,
    pub results: ForecastResults,
}

/// Runs forecast jobs against a forecast API
#[derive(Clone)]
pub struct ForecastJobRunner {
    api: Arc<dyn ForecastApi>,
    config: RunnerConfig,
}

impl ForecastJobRunner {
    /// Creates a new runner
    pub fn new(api: Arc<dyn ForecastApi>, config: RunnerConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Submits a forecast job
    ///
    /// Creates the job and records one use of the model. A failed usage update
    /// is logged and otherwise ignored.
    ///
    /// # Returns
    /// The id of the created job
    pub async fn submit(&self, req: &CreateForecastJob) -> Result<Uuid, RunError> {
        self.create_job(req).await.map(|job| job.id)
    }

    /// Runs a forecast job to completion on the current task
    pub async fn run(&self, req: CreateForecastJob) -> Result<ForecastRun, RunError> {
        let (state, _) = watch::channel(RunState::default());
        self.run_with(req, &state, CancellationToken::new()).await
    }

    /// Runs a forecast job on a background task
    ///
    /// Dropping the returned handle tears the run down.
    pub fn spawn(&self, req: CreateForecastJob) -> RunHandle {
        let (state, _) = watch::channel(RunState::default());
        let state = Arc::new(state);
        let cancel = CancellationToken::new();

        let runner = self.clone();
        let task_state = Arc::clone(&state);
        let token = cancel.clone();
        let task = tokio::spawn(async move { runner.run_with(req, &task_state, token).await });

        RunHandle::new(state, cancel, task)
    }

    async fn run_with(
        &self,
        req: CreateForecastJob,
        state: &watch::Sender<RunState>,
        cancel: CancellationToken,
    ) -> Result<ForecastRun, RunError> {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RunError::Aborted),
            outcome = self.execute(req, state) => outcome,
        };

        match &outcome {
            Ok(run) => {
                info!("Forecast job {} finished with results", run.job.id);
                state.send_modify(|s| {
                    s.phase = RunPhase::Completed;
                    s.job = Some(run.job.clone());
                });
            }
            Err(RunError::Aborted) => {
                info!("Forecast run aborted");
                state.send_modify(|s| s.phase = RunPhase::Aborted);
            }
            Err(e) => {
                error!("Forecast run failed: {}", e);
                state.send_modify(|s| {
                    s.phase = e.phase();
                    s.error = Some(e.user_message());
                });
            }
        }

        outcome
    }

    async fn execute(
        &self,
        req: CreateForecastJob,
        state: &watch::Sender<RunState>,
    ) -> Result<ForecastRun, RunError> {
        state.send_modify(|s| s.phase = RunPhase::Submitting);

        let created = self.create_job(&req).await?;
        let job_id = created.id;

        state.send_modify(|s| {
            s.phase = RunPhase::Polling;
            s.job_id = Some(job_id);
            s.job = Some(created);
        });

        let poller = StatusPoller::new(Arc::clone(&self.api), self.config.poll_interval);
        let polling = poller.poll_until_terminal(job_id, |job| {
            state.send_modify(|s| s.job = Some(job.clone()));
        });

        let job = match time::timeout(self.config.timeout, polling).await {
            Ok(polled) => polled?,
            Err(_) => {
                warn!(
                    "Job {} not finished after {:?}, giving up",
                    job_id, self.config.timeout
                );
                return Err(RunError::TimedOut {
                    job_id,
                    after: self.config.timeout,
                });
            }
        };

        let payload = self
            .api
            .job_results(job_id)
            .await
            .map_err(|source| RunError::Results { job_id, source })?;

        Ok(ForecastRun {
            job,
            results: ForecastResults::new(job_id, payload),
        })
    }

    async fn create_job(&self, req: &CreateForecastJob) -> Result<ForecastJob, RunError> {
        req.validate().map_err(RunError::InvalidRequest)?;

        let job = self.api.create_job(req).await.map_err(RunError::Submit)?;

        info!(
            "Submitted forecast job {} (model {}, {} target(s))",
            job.id,
            req.model_id,
            req.target_ids.len()
        );

        if let Err(e) = self.api.increment_model_usage(&req.model_id).await {
            warn!("Failed to record usage of model {}: {}", req.model_id, e);
        }

        Ok(job)
    }
}
