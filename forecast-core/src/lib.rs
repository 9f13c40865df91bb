//! Forecast Core
//!
//! Core types shared by the forecast client, runner, CLI and simulated backend.
//!
//! This crate contains:
//! - Domain types: Forecast jobs, result sets, model usage
//! - DTOs: Request bodies sent to the forecast API

pub mod domain;
pub mod dto;
