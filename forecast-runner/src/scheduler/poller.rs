//! Job status poller
//!
//! Fetches the status of one job on a fixed interval. The first request goes
//! out one interval after polling starts. Polling ends on the first terminal
//! status or the first failed request; the caller owns the timeout.

use forecast_client::ForecastApi;
use forecast_core::domain::job::{ForecastJob, JobStatus};
use std::sync::Arc;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::RunError;

/// Polls a forecast job until it reaches a terminal status
pub struct StatusPoller {
    api: Arc<dyn ForecastApi>,
    interval: Duration,
}

impl StatusPoller {
    /// Creates a new status poller
    pub fn new(api: Arc<dyn ForecastApi>, interval: Duration) -> Self {
        Self { api, interval }
    }

    /// Polls until the job completes, fails or is cancelled
    ///
    /// `on_update` sees every status response, including the terminal one.
    ///
    /// # Returns
    /// The completed job, or the error that ended polling
    pub async fn poll_until_terminal<F>(
        &self,
        job_id: Uuid,
        mut on_update: F,
    ) -> Result<ForecastJob, RunError>
    where
        F: FnMut(&ForecastJob),
    {
        info!("Polling job {} every {:?}", job_id, self.interval);

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        // Never fire back-to-back polls after a slow request.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let job = self
                .api
                .job_status(job_id)
                .await
                .map_err(|source| RunError::Status { job_id, source })?;

            debug!(
                "Job {} is {} ({:.0}%)",
                job_id,
                job.status,
                job.progress_percent()
            );

            on_update(&job);

            match job.status {
                JobStatus::Completed => {
                    info!("Job {} completed", job_id);
                    return Ok(job);
                }
                JobStatus::Failed => {
                    return Err(RunError::JobFailed {
                        job_id,
                        reason: job.error,
                    });
                }
                JobStatus::Cancelled => return Err(RunError::JobCancelled { job_id }),
                JobStatus::Pending | JobStatus::Running => {}
            }
        }
    }
}
