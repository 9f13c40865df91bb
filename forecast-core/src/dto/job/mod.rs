//! Forecast job DTOs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request to create a new forecast job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateForecastJob {
    pub model_id: String,
    pub target_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
}

impl CreateForecastJob {
    pub fn new(model_id: impl Into<String>, target_ids: Vec<String>) -> Self {
        Self {
            model_id: model_id.into(),
            target_ids,
            scenario: None,
            parameters: HashMap::new(),
        }
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Checks the request before it is sent
    pub fn validate(&self) -> Result<(), String> {
        if self.model_id.trim().is_empty() {
            return Err("model_id cannot be empty".to_string());
        }

        if self.target_ids.is_empty() {
            return Err("at least one target id is required".to_string());
        }

        if self.target_ids.iter().any(|t| t.trim().is_empty()) {
            return Err("target ids cannot be empty".to_string());
        }

        Ok(())
    }
}
