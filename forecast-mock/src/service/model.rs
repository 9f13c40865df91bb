//! Model Service

use forecast_core::domain::model::ModelUsage;

use crate::repository::{Store, model_repository};

/// Record one use of a model
pub async fn increment_usage(store: &Store, model_id: &str) -> ModelUsage {
    let usage_count = model_repository::increment_usage(store, model_id).await;

    tracing::debug!("Model {} used {} time(s)", model_id, usage_count);

    ModelUsage {
        model_id: model_id.to_string(),
        usage_count,
    }
}

/// Get the usage counter of a model
pub async fn get_usage(store: &Store, model_id: &str) -> ModelUsage {
    ModelUsage {
        model_id: model_id.to_string(),
        usage_count: model_repository::usage(store, model_id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_usage_counts_per_model() {
        let store = Store::default();

        assert_eq!(get_usage(&store, "arima").await.usage_count, 0);
        increment_usage(&store, "arima").await;
        let usage = increment_usage(&store, "arima").await;
        increment_usage(&store, "prophet").await;

        assert_eq!(usage.usage_count, 2);
        assert_eq!(get_usage(&store, "arima").await.usage_count, 2);
        assert_eq!(get_usage(&store, "prophet").await.usage_count, 1);
    }
}
