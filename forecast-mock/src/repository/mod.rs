//! Repository Module
//!
//! In-memory storage for the simulated backend. Each submodule handles the
//! records of one resource.

pub mod job;
pub mod model;

pub use job as job_repository;
pub use model as model_repository;

use forecast_core::domain::job::ForecastJob;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory store shared by all handlers
#[derive(Default)]
pub struct Store {
    jobs: RwLock<HashMap<Uuid, ForecastJob>>,
    results: RwLock<HashMap<Uuid, serde_json::Value>>,
    usage: RwLock<HashMap<String, u64>>,
}
