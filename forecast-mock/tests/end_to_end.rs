//! End-to-end tests: HTTP client and runner against the simulated backend

use std::sync::Arc;
use std::time::Duration;

use forecast_client::{ClientError, ForecastClient};
use forecast_core::domain::job::JobStatus;
use forecast_core::dto::job::CreateForecastJob;
use forecast_mock::config::MockConfig;
use forecast_mock::{AppState, api};
use forecast_runner::{ForecastJobRunner, RunError, RunPhase, RunnerConfig};
use serde_json::json;
use uuid::Uuid;

/// Starts the backend on an ephemeral port and returns its base URL
async fn start_backend(step_ms: u64, step_percent: f64) -> String {
    let config = MockConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        step: Duration::from_millis(step_ms),
        step_percent,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let app = api::create_router(AppState::new(config));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn fast_runner(client: ForecastClient) -> ForecastJobRunner {
    let config = RunnerConfig::default()
        .with_poll_interval(Duration::from_millis(20))
        .with_timeout(Duration::from_secs(5));
    ForecastJobRunner::new(Arc::new(client), config)
}

#[tokio::test]
async fn test_health() {
    let base = start_backend(10, 25.0).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_runner_completes_job_and_fetches_results() {
    let base = start_backend(10, 25.0).await;
    let client = ForecastClient::new(&base);
    let req = CreateForecastJob::new("arima", vec!["tech-1".to_string(), "tech-2".to_string()])
        .with_scenario("optimistic")
        .with_parameter("horizon", json!(4));

    let run = fast_runner(client.clone()).run(req).await.unwrap();

    assert_eq!(run.job.status, JobStatus::Completed);
    assert_eq!(run.job.progress, 100.0);
    assert_eq!(run.results.job_id, run.job.id);
    assert_eq!(run.results.payload["horizon"], 4);
    assert_eq!(run.results.payload["scenario"], "optimistic");
    assert_eq!(run.results.payload["forecasts"].as_array().unwrap().len(), 2);

    let usage = client.model_usage("arima").await.unwrap();
    assert_eq!(usage.usage_count, 1);
}

#[tokio::test]
async fn test_runner_reports_simulated_failure() {
    let base = start_backend(10, 30.0).await;
    let req = CreateForecastJob::new("prophet", vec!["tech-1".to_string()])
        .with_parameter("simulate_failure", json!(true));

    let err = fast_runner(ForecastClient::new(&base))
        .run(req)
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::JobFailed { .. }));
    assert_eq!(err.user_message(), "The forecast failed: Simulated model failure");
}

#[tokio::test]
async fn test_runner_observes_cancellation() {
    let base = start_backend(60_000, 10.0).await;
    let client = ForecastClient::new(&base);
    let handle = fast_runner(client.clone())
        .spawn(CreateForecastJob::new("arima", vec!["tech-1".to_string()]));

    let mut rx = handle.subscribe();
    let job_id = rx
        .wait_for(|s| s.job_id.is_some())
        .await
        .unwrap()
        .job_id
        .unwrap();

    let cancelled = client.cancel_job(job_id).await.unwrap();
    assert_eq!(cancelled.status, JobStatus::Cancelled);

    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, RunError::JobCancelled { .. }));
    assert_eq!(err.phase(), RunPhase::Cancelled);
}

#[tokio::test]
async fn test_runner_times_out_on_slow_job() {
    let base = start_backend(60_000, 10.0).await;
    let config = RunnerConfig::default()
        .with_poll_interval(Duration::from_millis(20))
        .with_timeout(Duration::from_millis(200));
    let runner = ForecastJobRunner::new(Arc::new(ForecastClient::new(&base)), config);

    let err = runner
        .run(CreateForecastJob::new("arima", vec!["tech-1".to_string()]))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_results_before_completion_conflict() {
    let base = start_backend(60_000, 10.0).await;
    let client = ForecastClient::new(&base);

    let job = client
        .create_job(&CreateForecastJob::new("arima", vec!["tech-1".to_string()]))
        .await
        .unwrap();
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.estimated_time_remaining, Some(600));

    let err = client.get_job_results(job.id).await.unwrap_err();
    assert!(matches!(err, ClientError::ApiError { status: 409, .. }));
}

#[tokio::test]
async fn test_unknown_job_is_not_found() {
    let base = start_backend(10, 25.0).await;
    let client = ForecastClient::new(&base);

    let err = client.get_job(Uuid::new_v4()).await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        ClientError::ApiError { message, .. } => assert!(message.ends_with("not found")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_create_is_rejected_by_backend() {
    let base = start_backend(10, 25.0).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/forecast/jobs", base))
        .json(&json!({ "model_id": "arima", "target_ids": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "at least one target id is required");
}

#[tokio::test]
async fn test_submit_error_against_unreachable_backend() {
    // Nothing listens on port 9 of localhost.
    let runner = fast_runner(ForecastClient::new("http://127.0.0.1:9"));

    let err = runner
        .run(CreateForecastJob::new("arima", vec!["tech-1".to_string()]))
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::Submit(ClientError::RequestFailed(_))));
}
