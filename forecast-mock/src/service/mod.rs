//! Service Module
//!
//! Business logic of the simulated backend.

pub mod job;
pub mod model;
pub mod simulation;

// Re-export for convenience
pub use job as job_service;
pub use model as model_service;
