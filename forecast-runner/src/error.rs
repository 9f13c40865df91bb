//! Error type for forecast runs

use forecast_client::ClientError;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::state::RunPhase;

/// Reason a forecast run ended without results
///
/// Each run produces at most one of these. [`RunError::user_message`] is the
/// single line shown to the user.
#[derive(Debug, Error)]
pub enum RunError {
    /// The request was rejected before anything was sent
    #[error("Invalid forecast request: {0}")]
    InvalidRequest(String),

    /// The create-job call failed
    #[error("Failed to submit forecast job: {0}")]
    Submit(#[source] ClientError),

    /// A status request failed while polling
    #[error("Failed to fetch status of job {job_id}: {source}")]
    Status { job_id: Uuid, source: ClientError },

    /// The job completed but its results could not be fetched
    #[error("Failed to fetch results of job {job_id}: {source}")]
    Results { job_id: Uuid, source: ClientError },

    /// The backend reported the job as failed
    #[error("Forecast job {job_id} failed: {}", reason.as_deref().unwrap_or("no reason given"))]
    JobFailed {
        job_id: Uuid,
        reason: Option<String>,
    },

    /// The backend reported the job as cancelled
    #[error("Forecast job {job_id} was cancelled")]
    JobCancelled { job_id: Uuid },

    /// No terminal status within the configured limit
    #[error("Forecast job {job_id} did not finish within {}s", after.as_secs())]
    TimedOut { job_id: Uuid, after: Duration },

    /// The owner of the run tore it down
    #[error("Forecast run was aborted")]
    Aborted,

    /// The run task stopped without producing an outcome
    #[error("Forecast run stopped unexpectedly: {0}")]
    Internal(String),
}

impl RunError {
    /// The one message surfaced to the user for this attempt
    pub fn user_message(&self) -> String {
        match self {
            RunError::InvalidRequest(msg) => format!("Invalid forecast request: {}", msg),
            RunError::Submit(e) => format!("Could not start the forecast: {}", e),
            RunError::Status { source, .. } => {
                format!("Lost track of the forecast job: {}", source)
            }
            RunError::Results { source, .. } => {
                format!("The forecast finished but its results could not be loaded: {}", source)
            }
            RunError::JobFailed { reason, .. } => match reason {
                Some(reason) => format!("The forecast failed: {}", reason),
                None => "The forecast failed.".to_string(),
            },
            RunError::JobCancelled { .. } => "The forecast was cancelled.".to_string(),
            RunError::TimedOut { after, .. } => format!(
                "The forecast did not finish within {}. Please try again.",
                format_duration(*after)
            ),
            RunError::Aborted => "The forecast run was aborted.".to_string(),
            RunError::Internal(msg) => format!("The forecast run stopped unexpectedly: {}", msg),
        }
    }

    /// Phase a run ends in when it fails with this error
    pub fn phase(&self) -> RunPhase {
        match self {
            RunError::JobCancelled { .. } => RunPhase::Cancelled,
            RunError::TimedOut { .. } => RunPhase::TimedOut,
            RunError::Aborted => RunPhase::Aborted,
            _ => RunPhase::Failed,
        }
    }

    /// Job the error refers to, when one had been created
    pub fn job_id(&self) -> Option<Uuid> {
        match self {
            RunError::Status { job_id, .. }
            | RunError::Results { job_id, .. }
            | RunError::JobFailed { job_id, .. }
            | RunError::JobCancelled { job_id }
            | RunError::TimedOut { job_id, .. } => Some(*job_id),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RunError::TimedOut { .. })
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        let minutes = secs / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{} minutes", minutes)
        }
    } else if secs == 1 {
        "1 second".to_string()
    } else {
        format!("{} seconds", secs)
    }
}
