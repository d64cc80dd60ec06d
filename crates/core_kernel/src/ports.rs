//! Ports and Adapters Infrastructure
//!
//! The claim pipeline depends on two hosted language-model calls and a
//! document reader. Each of those sits behind a port trait defined in the
//! domain crate; this module holds the pieces every port shares.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Claim Pipeline                           │
//! │        (validation, routing, decision assembly)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Port Traits                             │
//! │          (ExtractionPort, ReasoningPort)                     │
//! │   Defined in domain_claims, depend only on core_kernel       │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │  Hosted model     │     │  Scripted mock   │
//!         │  adapter (HTTP)   │     │  (tests)         │
//!         └───────────────────┘     └──────────────────┘
//! ```
//!
//! Every adapter reports failures as [`PortError`]. The retry layer only
//! needs [`PortError::is_transient`] to decide whether another attempt is
//! worthwhile.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// so the retry layer can classify failures without knowing the adapter.
#[derive(Debug, Error)]
pub enum PortError {
    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// Rate limit exceeded for external API
    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        retry_after_secs: u64,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// Authentication or authorization failed
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// The call succeeded but its payload could not be interpreted
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        PortError::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a ServiceUnavailable error
    pub fn unavailable(service: impl fmt::Display) -> Self {
        PortError::ServiceUnavailable {
            service: service.to_string(),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::RateLimited { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if the response arrived but was structurally unusable
    pub fn is_transformation(&self) -> bool {
        matches!(self, PortError::Transformation { .. })
    }

    /// Short, stable label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            PortError::Timeout { .. } => "timeout",
            PortError::RateLimited { .. } => "rate_limited",
            PortError::Connection { .. } => "connection",
            PortError::ServiceUnavailable { .. } => "service_unavailable",
            PortError::Unauthorized { .. } => "unauthorized",
            PortError::Transformation { .. } => "transformation",
            PortError::Internal { .. } => "internal",
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is degraded but operational
    Degraded,
    /// Adapter is unhealthy and not operational
    Unhealthy,
    /// Health status is unknown
    Unknown,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Builds a result stamped with the current time
    pub fn now(adapter_id: impl Into<String>, status: AdapterHealth, message: Option<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            message,
            checked_at: chrono::Utc::now(),
        }
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    ///
    /// # Returns
    ///
    /// A `HealthCheckResult` indicating the current health status
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::timeout("extract_claim", 5000);
        assert!(timeout.is_transient());

        let rate_limited = PortError::RateLimited {
            retry_after_secs: 60,
        };
        assert!(rate_limited.is_transient());

        assert!(PortError::connection("reset by peer").is_transient());
        assert!(PortError::unavailable("gemini").is_transient());
    }

    #[test]
    fn test_port_error_not_transient() {
        let malformed = PortError::transformation("not json");
        assert!(!malformed.is_transient());
        assert!(malformed.is_transformation());

        let unauthorized = PortError::Unauthorized {
            message: "bad key".to_string(),
        };
        assert!(!unauthorized.is_transient());
        assert!(!PortError::internal("boom").is_transient());
    }

    #[test]
    fn test_port_error_kind_labels() {
        assert_eq!(PortError::timeout("op", 1).kind(), "timeout");
        assert_eq!(PortError::transformation("x").kind(), "transformation");
        assert_eq!(PortError::unavailable("svc").kind(), "service_unavailable");
    }

    #[test]
    fn test_health_check_result_now() {
        let result = HealthCheckResult::now("gemini", AdapterHealth::Healthy, None);
        assert_eq!(result.adapter_id, "gemini");
        assert_eq!(result.status, AdapterHealth::Healthy);
    }
}
