//! Model API endpoints

use crate::ForecastClient;
use crate::error::Result;
use forecast_core::domain::model::ModelUsage;

impl ForecastClient {
    /// Record one use of a model
    ///
    /// # Returns
    /// The updated usage counter
    pub async fn increment_model_usage(&self, model_id: &str) -> Result<ModelUsage> {
        let url = self.endpoint(&["api", "models", model_id, "usage"])?;
        let response = self.client.post(url).send().await?;

        self.handle_response(response).await
    }

    /// Get the usage counter of a model
    pub async fn model_usage(&self, model_id: &str) -> Result<ModelUsage> {
        let url = self.endpoint(&["api", "models", model_id, "usage"])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}
