//! Simulated backend configuration

use std::time::Duration;

/// Smallest accepted progress increment per step
pub const MIN_STEP_PERCENT: f64 = 0.01;

/// Configuration of the simulated backend
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Address to listen on
    pub bind_addr: String,

    /// Time between two progress increments of a job
    pub step: Duration,

    /// Progress added to a job on every step
    pub step_percent: f64,
}

impl MockConfig {
    /// Creates configuration from environment variables
    ///
    /// Recognised environment variables:
    /// - FORECAST_MOCK_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - FORECAST_MOCK_STEP_MS (optional, milliseconds, default: 1000)
    /// - FORECAST_MOCK_STEP_PERCENT (optional, default: 10)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable source
    ///
    /// Malformed numeric values are rejected rather than replaced by defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = lookup("FORECAST_MOCK_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let step = match lookup("FORECAST_MOCK_STEP_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("FORECAST_MOCK_STEP_MS must be an integer, got '{}'", raw)
            })?),
            None => defaults.step,
        };

        let step_percent = match lookup("FORECAST_MOCK_STEP_PERCENT") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                anyhow::anyhow!("FORECAST_MOCK_STEP_PERCENT must be a number, got '{}'", raw)
            })?,
            None => defaults.step_percent,
        };

        let config = Self {
            bind_addr,
            step,
            step_percent,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.step.is_zero() {
            anyhow::bail!("step must be greater than 0");
        }

        if !(MIN_STEP_PERCENT..=100.0).contains(&self.step_percent) {
            anyhow::bail!("step_percent must be between {} and 100", MIN_STEP_PERCENT);
        }

        Ok(())
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            step: Duration::from_secs(1),
            step_percent: 10.0,
        }
    }
}
