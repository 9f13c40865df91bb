//! Scheduler layer for the runner
//!
//! Drives the status polling of a single forecast job until the backend
//! reports a terminal status.

pub mod poller;

pub use poller::StatusPoller;
