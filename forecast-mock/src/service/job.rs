//! Job Service
//!
//! Business logic for forecast job lifecycle.

use chrono::Utc;
use forecast_core::domain::job::{ForecastJob, JobStatus};
use forecast_core::dto::job::CreateForecastJob;
use uuid::Uuid;

use crate::AppState;
use crate::repository::{Store, job_repository};
use crate::service::simulation;

/// Service error type
#[derive(Debug)]
pub enum JobError {
    NotFound(Uuid),
    InvalidState(String),
    ValidationError(String),
}

/// Create a job and start simulating its progress
pub async fn create_job(state: &AppState, req: CreateForecastJob) -> Result<ForecastJob, JobError> {
    req.validate().map_err(JobError::ValidationError)?;

    let now = Utc::now();
    let job = ForecastJob {
        id: Uuid::new_v4(),
        model_id: req.model_id,
        target_ids: req.target_ids,
        scenario: req.scenario,
        parameters: req.parameters,
        status: JobStatus::Pending,
        progress: 0.0,
        estimated_time_remaining: Some(simulation::estimate_remaining(&state.config, 0.0)),
        error: None,
        created_at: now,
        updated_at: now,
    };

    job_repository::insert(&state.store, job.clone()).await;

    tracing::info!(
        "Job created: {} for model {} ({} target(s))",
        job.id,
        job.model_id,
        job.target_ids.len()
    );

    simulation::spawn(state.clone(), job.id);

    Ok(job)
}

/// Get a job by ID
pub async fn get_job(store: &Store, id: Uuid) -> Result<ForecastJob, JobError> {
    job_repository::find_by_id(store, id)
        .await
        .ok_or(JobError::NotFound(id))
}

/// Get the results of a completed job
pub async fn get_results(store: &Store, id: Uuid) -> Result<serde_json::Value, JobError> {
    let job = get_job(store, id).await?;

    if job.status != JobStatus::Completed {
        return Err(JobError::InvalidState(format!(
            "Job {} has no results (status: {})",
            id, job.status
        )));
    }

    job_repository::find_results(store, id)
        .await
        .ok_or_else(|| JobError::InvalidState(format!("Results of job {} are missing", id)))
}

/// Cancel a job that has not finished yet
pub async fn cancel_job(store: &Store, id: Uuid) -> Result<ForecastJob, JobError> {
    let mut already_terminal = None;

    let job = job_repository::update(store, id, |job| {
        if job.status.is_terminal() {
            already_terminal = Some(job.status);
            return;
        }
        job.status = JobStatus::Cancelled;
        job.estimated_time_remaining = None;
    })
    .await
    .ok_or(JobError::NotFound(id))?;

    if let Some(status) = already_terminal {
        return Err(JobError::InvalidState(format!(
            "Job {} is already {}",
            id, status
        )));
    }

    tracing::info!("Job {} cancelled", id);

    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockConfig;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(MockConfig {
            step: Duration::from_millis(10),
            step_percent: 50.0,
            ..MockConfig::default()
        })
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_request() {
        let state = state();
        let err = create_job(&state, CreateForecastJob::new("", vec!["a".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_results_only_after_completion() {
        let state = state();
        let job = create_job(&state, CreateForecastJob::new("arima", vec!["a".to_string()]))
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Pending);
        assert!(matches!(
            get_results(&state.store, job.id).await,
            Err(JobError::InvalidState(_))
        ));

        tokio::time::sleep(Duration::from_millis(200)).await;

        let job = get_job(&state.store, job.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100.0);
        assert!(get_results(&state.store, job.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancel() {
        let state = AppState::new(MockConfig {
            step: Duration::from_secs(60),
            ..MockConfig::default()
        });
        let job = create_job(&state, CreateForecastJob::new("arima", vec!["a".to_string()]))
            .await
            .unwrap();

        let cancelled = cancel_job(&state.store, job.id).await.unwrap();
        assert_eq!(cancelled.status, JobStatus::Cancelled);

        let again = cancel_job(&state.store, job.id).await.unwrap_err();
        assert!(matches!(again, JobError::InvalidState(_)));

        let missing = cancel_job(&state.store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(missing, JobError::NotFound(_)));
    }
}
