//! Forecast Job API Handlers
//!
//! HTTP endpoints for forecast job lifecycle.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use forecast_core::domain::job::ForecastJob;
use forecast_core::dto::job::CreateForecastJob;
use uuid::Uuid;

use crate::AppState;
use crate::api::error::ApiResult;
use crate::service::job_service;

/// POST /api/forecast/jobs
/// Create a forecast job
pub async fn create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateForecastJob>,
) -> ApiResult<(StatusCode, Json<ForecastJob>)> {
    tracing::info!("Creating forecast job for model: {}", req.model_id);

    let job = job_service::create_job(&state, req).await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/forecast/jobs/{id}
/// Get the current state of a job
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ForecastJob>> {
    tracing::debug!("Getting job: {}", id);

    let job = job_service::get_job(&state.store, id).await?;

    Ok(Json(job))
}

/// GET /api/forecast/jobs/{id}/results
/// Get the results of a completed job
pub async fn get_job_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    tracing::debug!("Getting results of job: {}", id);

    let results = job_service::get_results(&state.store, id).await?;

    Ok(Json(results))
}

/// POST /api/forecast/jobs/{id}/cancel
/// Cancel a job that has not finished
pub async fn cancel_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ForecastJob>> {
    tracing::info!("Cancelling job: {}", id);

    let job = job_service::cancel_job(&state.store, id).await?;

    Ok(Json(job))
}
