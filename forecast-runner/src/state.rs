//! Observable run state

use forecast_core::domain::job::ForecastJob;
use uuid::Uuid;

/// Lifecycle phase of a forecast run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Submitting,
    Polling,
    Completed,
    Failed,
    Cancelled,
    TimedOut,
    Aborted,
}

impl RunPhase {
    /// Whether the run has ended
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            RunPhase::Completed
                | RunPhase::Failed
                | RunPhase::Cancelled
                | RunPhase::TimedOut
                | RunPhase::Aborted
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Submitting => "submitting",
            RunPhase::Polling => "polling",
            RunPhase::Completed => "completed",
            RunPhase::Failed => "failed",
            RunPhase::Cancelled => "cancelled",
            RunPhase::TimedOut => "timed-out",
            RunPhase::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a forecast run, published on every transition and every poll
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub phase: RunPhase,
    /// Set once the job has been created
    pub job_id: Option<Uuid>,
    /// Latest job state seen by the runner
    pub job: Option<ForecastJob>,
    /// User-facing error, set only when the run ends in an error
    pub error: Option<String>,
}

impl RunState {
    /// Latest progress percentage, 0 before the first status arrives
    pub fn progress(&self) -> f64 {
        self.job
            .as_ref()
            .map(ForecastJob::progress_percent)
            .unwrap_or(0.0)
    }
}
