//! Core domain types
//!
//! These types mirror the JSON the forecast API exchanges and are shared between
//! the client side (runner, CLI) and the simulated backend.

pub mod job;
pub mod model;
pub mod results;
