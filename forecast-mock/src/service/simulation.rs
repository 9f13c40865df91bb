//! Job progress simulation
//!
//! Every created job gets a task that advances it by a fixed increment on a
//! timer: `pending` on creation, `running` after the first step, `completed`
//! at 100%. Results are stored before the job is marked completed, so a
//! completed job always has results.

use forecast_core::domain::job::{ForecastJob, JobStatus};
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use uuid::Uuid;

use crate::AppState;
use crate::config::MockConfig;
use crate::repository::job_repository;

/// Progress after which a job asked to fail does so
const FAILURE_THRESHOLD: f64 = 50.0;

const DEFAULT_HORIZON: u64 = 12;
const MAX_HORIZON: u64 = 120;

/// Starts the progress task of a job
pub fn spawn(state: AppState, job_id: Uuid) -> JoinHandle<()> {
    tokio::spawn(async move { run(state, job_id).await })
}

async fn run(state: AppState, job_id: Uuid) {
    let step = state.config.step;
    let mut ticker = time::interval_at(Instant::now() + step, step);

    loop {
        ticker.tick().await;

        let Some(current) = job_repository::find_by_id(&state.store, job_id).await else {
            tracing::warn!("Job {} disappeared during simulation", job_id);
            return;
        };

        if current.status.is_terminal() {
            tracing::debug!("Job {} is {}, stopping simulation", job_id, current.status);
            return;
        }

        let progress = (current.progress + state.config.step_percent).min(100.0);

        if wants_failure(&current) && progress > FAILURE_THRESHOLD {
            job_repository::update(&state.store, job_id, |job| {
                if job.status.is_terminal() {
                    return;
                }
                job.status = JobStatus::Failed;
                job.progress = progress;
                job.estimated_time_remaining = None;
                job.error = Some("Simulated model failure".to_string());
            })
            .await;
            tracing::info!("Job {} failed (simulated)", job_id);
            return;
        }

        if progress >= 100.0 {
            job_repository::save_results(&state.store, job_id, generate_results(&current)).await;
            job_repository::update(&state.store, job_id, |job| {
                if job.status.is_terminal() {
                    return;
                }
                job.status = JobStatus::Completed;
                job.progress = 100.0;
                job.estimated_time_remaining = Some(0);
            })
            .await;
            tracing::info!("Job {} completed", job_id);
            return;
        }

        let eta = estimate_remaining(&state.config, progress);
        job_repository::update(&state.store, job_id, |job| {
            if job.status.is_terminal() {
                return;
            }
            job.status = JobStatus::Running;
            job.progress = progress;
            job.estimated_time_remaining = Some(eta);
        })
        .await;
        tracing::debug!("Job {} at {:.0}%", job_id, progress);
    }
}

/// Seconds until a job at `progress` completes, rounded up
pub fn estimate_remaining(config: &MockConfig, progress: f64) -> u64 {
    let remaining = (100.0 - progress).max(0.0);
    let steps = (remaining / config.step_percent).ceil() as u64;
    let step_millis = u64::try_from(config.step.as_millis()).unwrap_or(u64::MAX);
    steps.saturating_mul(step_millis).div_ceil(1000)
}

fn wants_failure(job: &ForecastJob) -> bool {
    job.parameters
        .get("simulate_failure")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Deterministic synthetic forecast for every target of a job
pub fn generate_results(job: &ForecastJob) -> Value {
    let horizon = job
        .parameters
        .get("horizon")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_HORIZON)
        .clamp(1, MAX_HORIZON);

    let growth: f64 = match job.scenario.as_deref() {
        Some("optimistic") => 0.03,
        Some("pessimistic") => 0.005,
        _ => 0.015,
    };

    let forecasts: Vec<Value> = job
        .target_ids
        .iter()
        .enumerate()
        .map(|(i, target_id)| {
            let base = 100.0 + 10.0 * i as f64;
            let points: Vec<Value> = (1..=horizon)
                .map(|t| {
                    let value = base * (1.0 + growth).powi(t as i32);
                    // Interval widens with the horizon.
                    let spread = value * 0.02 * (t as f64).sqrt();
                    json!({
                        "step": t,
                        "value": round2(value),
                        "lower": round2(value - spread),
                        "upper": round2(value + spread),
                    })
                })
                .collect();

            json!({ "target_id": target_id, "points": points })
        })
        .collect();

    json!({
        "job_id": job.id,
        "model_id": job.model_id,
        "scenario": job.scenario,
        "horizon": horizon,
        "forecasts": forecasts,
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
