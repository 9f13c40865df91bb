//! Runner configuration
//!
//! Polling cadence and the wall-clock limit of a forecast run.

use std::time::Duration;

/// Default status polling interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default limit on how long a job may be polled
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// How often to fetch the job status
    pub poll_interval: Duration,

    /// How long to keep polling before giving up
    pub timeout: Duration,
}

impl RunnerConfig {
    /// Creates a new configuration with defaults
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognised environment variables:
    /// - FORECAST_POLL_INTERVAL_MS (optional, milliseconds, default: 1000)
    /// - FORECAST_TIMEOUT_SECS (optional, seconds, default: 300)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let poll_interval = match lookup("FORECAST_POLL_INTERVAL_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("FORECAST_POLL_INTERVAL_MS must be an integer, got '{}'", raw)
            })?),
            None => DEFAULT_POLL_INTERVAL,
        };

        let timeout = match lookup("FORECAST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("FORECAST_TIMEOUT_SECS must be an integer, got '{}'", raw)
            })?),
            None => DEFAULT_TIMEOUT,
        };

        let config = Self {
            poll_interval,
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        if self.timeout < self.poll_interval {
            anyhow::bail!(
                "timeout ({:?}) must not be shorter than poll_interval ({:?})",
                self.timeout,
                self.poll_interval
            );
        }

        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new()
    }
}
