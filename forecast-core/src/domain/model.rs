//! Forecast model domain types

use serde::{Deserialize, Serialize};

/// Usage counter for a forecast model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelUsage {
    pub model_id: String,
    pub usage_count: u64,
}
