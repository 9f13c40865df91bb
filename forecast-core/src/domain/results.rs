//! Forecast result domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Results of a completed forecast job
///
/// The payload is opaque to the runner; it is stored exactly as the API returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResults {
    pub job_id: Uuid,
    pub fetched_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl ForecastResults {
    pub fn new(job_id: Uuid, payload: serde_json::Value) -> Self {
        Self {
            job_id,
            fetched_at: Utc::now(),
            payload,
        }
    }
}
