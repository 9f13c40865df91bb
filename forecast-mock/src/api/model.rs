//! Model API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use forecast_core::domain::model::ModelUsage;

use crate::AppState;
use crate::service::model_service;

/// POST /api/models/{model_id}/usage
/// Record one use of a model
pub async fn increment_usage(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Json<ModelUsage> {
    Json(model_service::increment_usage(&state.store, &model_id).await)
}

/// GET /api/models/{model_id}/usage
pub async fn get_usage(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Json<ModelUsage> {
    Json(model_service::get_usage(&state.store, &model_id).await)
}
