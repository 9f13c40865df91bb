//! Forecast Runner
//!
//! Client-side controller for asynchronous forecast jobs.
//!
//! A run goes through `idle -> submitting -> polling` and ends in exactly one of
//! `completed`, `failed`, `cancelled`, `timed-out` (or `aborted` when its owner
//! tears it down):
//! - Submission: create the job through the forecast API and record model usage
//! - Polling: fetch job status on a fixed interval until a terminal status
//! - Timeout: a single wall-clock limit on polling
//! - Results: fetched once, only after the job reports `completed`
//!
//! Every failure collapses into one [`RunError`], which carries a single
//! user-facing message. Nothing is retried.

pub mod config;
pub mod error;
mod handle;
mod runner;
pub mod scheduler;
pub mod state;

pub use config::RunnerConfig;
pub use error::RunError;
pub use handle::RunHandle;
pub use runner::{ForecastJobRunner, ForecastRun};
pub use state::{RunPhase, RunState};

#[cfg(test)]
mod test_support;
