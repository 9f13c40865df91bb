//! API Module
//!
//! HTTP API layer of the simulated backend.
//! Each submodule handles endpoints for a specific resource.

pub mod error;
pub mod health;
pub mod job;
pub mod model;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Forecast job endpoints
        .route("/api/forecast/jobs", post(job::create_job))
        .route("/api/forecast/jobs/{id}", get(job::get_job))
        .route("/api/forecast/jobs/{id}/results", get(job::get_job_results))
        .route("/api/forecast/jobs/{id}/cancel", post(job::cancel_job))
        // Model endpoints
        .route(
            "/api/models/{model_id}/usage",
            get(model::get_usage).post(model::increment_usage),
        )
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
