//! Data Transfer Objects for the forecast API
//!
//! Request bodies that only exist on the wire. Responses are domain types.

pub mod job;
