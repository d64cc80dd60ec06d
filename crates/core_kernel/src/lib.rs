//! Core Kernel - Foundational types shared by the claims triage crates
//!
//! This crate provides the building blocks used across the workspace:
//! - A unified error taxonomy for calls into external collaborators
//! - A reusable retry policy with exponential backoff
//! - Request identifiers used to correlate log output

pub mod ports;
pub mod retry;
pub mod identifiers;
pub mod error;

pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use retry::{RetryPolicy, RetryError};
pub use identifiers::RequestId;
pub use error::CoreError;
