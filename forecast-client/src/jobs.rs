//! Forecast job API endpoints

use crate::ForecastClient;
use crate::error::{ClientError, Result};
use forecast_core::domain::job::ForecastJob;
use forecast_core::dto::job::CreateForecastJob;
use uuid::Uuid;

impl ForecastClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Create a new forecast job
    ///
    /// The request is validated locally first; an invalid request never reaches the API.
    ///
    /// # Example
    /// ```no_run
    /// # use forecast_client::ForecastClient;
    /// # use forecast_core::dto::job::CreateForecastJob;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ForecastClient::new("http://localhost:8080");
    /// let job = client
    ///     .create_job(&CreateForecastJob::new("arima", vec!["tech-1".to_string()]).with_scenario("baseline"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_job(&self, req: &CreateForecastJob) -> Result<ForecastJob> {
        req.validate().map_err(ClientError::InvalidRequest)?;

        let url = self.endpoint(&["api", "forecast", "jobs"])?;
        tracing::debug!("Creating forecast job for model {}", req.model_id);
        let response = self.client.post(url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Get the current state of a job
    pub async fn get_job(&self, job_id: Uuid) -> Result<ForecastJob> {
        let url = self.endpoint(&["api", "forecast", "jobs", &job_id.to_string()])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    /// Get the results of a completed job
    ///
    /// The payload is returned as raw JSON; its shape belongs to the model that produced it.
    pub async fn get_job_results(&self, job_id: Uuid) -> Result<serde_json::Value> {
        let url = self.endpoint(&["api", "forecast", "jobs", &job_id.to_string(), "results"])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    /// Ask the backend to cancel a job
    pub async fn cancel_job(&self, job_id: Uuid) -> Result<ForecastJob> {
        let url = self.endpoint(&["api", "forecast", "jobs", &job_id.to_string(), "cancel"])?;
        let response = self.client.post(url).send().await?;

        self.handle_response(response).await
    }
}
