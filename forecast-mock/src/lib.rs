//! Simulated forecast backend
//!
//! An in-memory stand-in for the forecast API. Jobs advance on a timer with
//! synthetic progress increments and complete with generated forecast series.

pub mod api;
pub mod config;
pub mod repository;
pub mod service;

use std::sync::Arc;

use crate::config::MockConfig;
use crate::repository::Store;

/// Shared state of the simulated backend
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: MockConfig,
}

impl AppState {
    pub fn new(config: MockConfig) -> Self {
        Self {
            store: Arc::new(Store::default()),
            config,
        }
    }
}
