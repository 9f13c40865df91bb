//! Collaborator API abstraction
//!
//! The forecast job runner only needs four operations from the backend. They
//! are expressed as a trait so the runner can be driven by the HTTP client or
//! by an in-memory implementation in tests.

use async_trait::async_trait;
use forecast_core::domain::job::ForecastJob;
use forecast_core::domain::model::ModelUsage;
use forecast_core::dto::job::CreateForecastJob;
use uuid::Uuid;

use crate::ForecastClient;
use crate::error::Result;

/// Operations the forecast job runner depends on
#[async_trait]
pub trait ForecastApi: Send + Sync {
    /// Creates a forecast job
    async fn create_job(&self, req: &CreateForecastJob) -> Result<ForecastJob>;

    /// Fetches the current state of a job
    async fn job_status(&self, job_id: Uuid) -> Result<ForecastJob>;

    /// Fetches the result payload of a completed job
    async fn job_results(&self, job_id: Uuid) -> Result<serde_json::Value>;

    /// Records one use of a model
    async fn increment_model_usage(&self, model_id: &str) -> Result<ModelUsage>;
}

#[async_trait]
impl ForecastApi for ForecastClient {
    async fn create_job(&self, req: &CreateForecastJob) -> Result<ForecastJob> {
        ForecastClient::create_job(self, req).await
    }

    async fn job_status(&self, job_id: Uuid) -> Result<ForecastJob> {
        self.get_job(job_id).await
    }

    async fn job_results(&self, job_id: Uuid) -> Result<serde_json::Value> {
        self.get_job_results(job_id).await
    }

    async fn increment_model_usage(&self, model_id: &str) -> Result<ModelUsage> {
        ForecastClient::increment_model_usage(self, model_id).await
    }
}
