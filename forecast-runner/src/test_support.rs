//! In-memory forecast API used by the runner tests

use async_trait::async_trait;
use chrono::Utc;
use forecast_client::{ClientError, ForecastApi};
use forecast_core::domain::job::{ForecastJob, JobStatus};
use forecast_core::domain::model::ModelUsage;
use forecast_core::dto::job::CreateForecastJob;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// One scripted answer to a status request
#[derive(Debug, Clone)]
pub enum Step {
    Status(JobStatus, f64),
    Failed(&'static str),
    HttpError(u16),
}

/// Scripted forecast API
///
/// Status requests consume the script in order; the last step repeats forever.
pub struct FakeApi {
    job_id: Uuid,
    steps: Mutex<VecDeque<Step>>,
    create_error: Option<u16>,
    results_error: bool,
    usage_error: bool,
    last_request: Mutex<Option<CreateForecastJob>>,
    create_calls: AtomicUsize,
    status_calls: AtomicUsize,
    results_calls: AtomicUsize,
    usage_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new(steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            job_id: Uuid::new_v4(),
            steps: Mutex::new(steps.into()),
            create_error: None,
            results_error: false,
            usage_error: false,
            last_request: Mutex::new(None),
            create_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            results_calls: AtomicUsize::new(0),
            usage_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_create_error(mut self, status: u16) -> Self {
        self.create_error = Some(status);
        self
    }

    pub fn with_results_error(mut self) -> Self {
        self.results_error = true;
        self
    }

    pub fn with_usage_error(mut self) -> Self {
        self.usage_error = true;
        self
    }

    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn results_calls(&self) -> usize {
        self.results_calls.load(Ordering::SeqCst)
    }

    pub fn usage_calls(&self) -> usize {
        self.usage_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CreateForecastJob> {
        self.last_request.lock().unwrap().clone()
    }

    fn next_step(&self) -> Step {
        let mut steps = self.steps.lock().unwrap();
        if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps.front().cloned().unwrap()
        }
    }

    fn job(&self, status: JobStatus, progress: f64, error: Option<String>) -> ForecastJob {
        ForecastJob {
            id: self.job_id,
            model_id: "arima".to_string(),
            target_ids: vec!["tech-1".to_string()],
            scenario: None,
            parameters: HashMap::new(),
            status,
            progress,
            estimated_time_remaining: None,
            error,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ForecastApi for FakeApi {
    async fn create_job(&self, req: &CreateForecastJob) -> forecast_client::Result<ForecastJob> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(req.clone());

        if let Some(status) = self.create_error {
            return Err(ClientError::api_error(status, "create rejected"));
        }
        Ok(self.job(JobStatus::Pending, 0.0, None))
    }

    async fn job_status(&self, job_id: Uuid) -> forecast_client::Result<ForecastJob> {
        assert_eq!(job_id, self.job_id);
        self.status_calls.fetch_add(1, Ordering::SeqCst);

        match self.next_step() {
            Step::Status(status, progress) => Ok(self.job(status, progress, None)),
            Step::Failed(reason) => Ok(self.job(JobStatus::Failed, 50.0, Some(reason.to_string()))),
            Step::HttpError(status) => Err(ClientError::api_error(status, "status unavailable")),
        }
    }

    async fn job_results(&self, job_id: Uuid) -> forecast_client::Result<serde_json::Value> {
        assert_eq!(job_id, self.job_id);
        self.results_calls.fetch_add(1, Ordering::SeqCst);

        if self.results_error {
            return Err(ClientError::api_error(500, "results unavailable"));
        }
        Ok(serde_json::json!({ "series": [1.5, 2.5, 3.5] }))
    }

    async fn increment_model_usage(&self, model_id: &str) -> forecast_client::Result<ModelUsage> {
        self.usage_calls.fetch_add(1, Ordering::SeqCst);

        if self.usage_error {
            return Err(ClientError::api_error(500, "usage unavailable"));
        }
        Ok(ModelUsage {
            model_id: model_id.to_string(),
            usage_count: self.usage_calls() as u64,
        })
    }
}
