//! Claim Pipeline Ports
//!
//! The pipeline consumes two hosted-model collaborators: one turns document
//! text into a candidate claim, the other explains a routing decision. Both
//! are defined here as port traits so the domain never depends on a
//! particular model vendor.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ports::{ExtractionPort, ReasoningPort};
//! use std::sync::Arc;
//!
//! let extraction: Arc<dyn ExtractionPort> = Arc::new(LlmExtractor::new(client.clone()));
//! let reasoning: Arc<dyn ReasoningPort> = Arc::new(LlmReasoner::new(client));
//! let orchestrator = ResilientOrchestrator::new(extraction, reasoning);
//! ```
//!
//! Adapters report every failure as a [`PortError`]; the orchestrator
//! decides what to retry from [`PortError::is_transient`].

use async_trait::async_trait;
use serde_json::Value;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::claim::Claim;
use crate::routing::Route;

/// Field-extraction collaborator
#[async_trait]
pub trait ExtractionPort: DomainPort + HealthCheckable {
    /// Returns an untyped candidate claim for the given document text
    ///
    /// The value is shaped by [`Claim::coerce`]; adapters should not try to
    /// validate it themselves. An answer that is not JSON at all is reported
    /// as `PortError::Transformation`.
    async fn extract_claim(&self, text: &str) -> Result<Value, PortError>;
}

/// Reasoning collaborator
#[async_trait]
pub trait ReasoningPort: DomainPort + HealthCheckable {
    /// Explains why `claim` was assigned `route`
    async fn explain(
        &self,
        claim: &Claim,
        route: Route,
        missing_fields: &[String],
    ) -> Result<String, PortError>;
}

/// Scripted port implementations for testing
///
/// Each port replays a queue of canned results, one per call, then falls
/// back to a repeating responder once the queue is empty. Calls are counted
/// so tests can assert on retry bounds.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use core_kernel::{AdapterHealth, HealthCheckResult};
    use tokio::sync::Mutex;

    type Responder<T> = Box<dyn Fn() -> Result<T, PortError> + Send + Sync>;

    fn exhausted<T>() -> Responder<T> {
        Box::new(|| Err(PortError::internal("scripted port has no more responses")))
    }

    /// Extraction port replaying canned results
    pub struct ScriptedExtractionPort {
        script: Mutex<VecDeque<Result<Value, PortError>>>,
        repeat: Responder<Value>,
        calls: AtomicU32,
        latency: Option<Duration>,
    }

    impl Default for ScriptedExtractionPort {
        fn default() -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                repeat: exhausted(),
                calls: AtomicU32::new(0),
                latency: None,
            }
        }
    }

    impl ScriptedExtractionPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Always answers with `value`
        pub fn returning(value: Value) -> Self {
            Self {
                repeat: Box::new(move || Ok(value.clone())),
                ..Self::default()
            }
        }

        /// Always fails with the error built by `error`
        pub fn failing(error: fn() -> PortError) -> Self {
            Self {
                repeat: Box::new(move || Err(error())),
                ..Self::default()
            }
        }

        /// Queues a successful answer
        pub fn then_ok(self, value: Value) -> Self {
            self.then(Ok(value))
        }

        /// Queues a failure
        pub fn then_err(self, error: PortError) -> Self {
            self.then(Err(error))
        }

        fn then(mut self, result: Result<Value, PortError>) -> Self {
            self.script.get_mut().push_back(result);
            self
        }

        /// Sleeps this long before answering each call
        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = Some(latency);
            self
        }

        /// Number of calls made so far
        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for ScriptedExtractionPort {}

    #[async_trait]
    impl HealthCheckable for ScriptedExtractionPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::now(
                "scripted-extraction-port",
                AdapterHealth::Healthy,
                Some("Scripted adapter always healthy".to_string()),
            )
        }
    }

    #[async_trait]
    impl ExtractionPort for ScriptedExtractionPort {
        async fn extract_claim(&self, _text: &str) -> Result<Value, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            let next = self.script.lock().await.pop_front();
            next.unwrap_or_else(|| (self.repeat)())
        }
    }

    /// Reasoning port replaying canned results
    pub struct ScriptedReasoningPort {
        script: Mutex<VecDeque<Result<String, PortError>>>,
        repeat: Responder<String>,
        calls: AtomicU32,
        seen: Mutex<Vec<(Route, Vec<String>)>>,
        latency: Option<Duration>,
    }

    impl Default for ScriptedReasoningPort {
        fn default() -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                repeat: exhausted(),
                calls: AtomicU32::new(0),
                seen: Mutex::new(Vec::new()),
                latency: None,
            }
        }
    }

    impl ScriptedReasoningPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Always answers with `text`
        pub fn returning(text: impl Into<String>) -> Self {
            let text = text.into();
            Self {
                repeat: Box::new(move || Ok(text.clone())),
                ..Self::default()
            }
        }

        /// Always fails with the error built by `error`
        pub fn failing(error: fn() -> PortError) -> Self {
            Self {
                repeat: Box::new(move || Err(error())),
                ..Self::default()
            }
        }

        pub fn then_ok(mut self, text: impl Into<String>) -> Self {
            self.script.get_mut().push_back(Ok(text.into()));
            self
        }

        pub fn then_err(mut self, error: PortError) -> Self {
            self.script.get_mut().push_back(Err(error));
            self
        }

        /// Sleeps this long before answering each call
        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = Some(latency);
            self
        }

        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        /// Route and missing fields passed to each call, in call order
        pub async fn seen(&self) -> Vec<(Route, Vec<String>)> {
            self.seen.lock().await.clone()
        }
    }

    impl DomainPort for ScriptedReasoningPort {}

    #[async_trait]
    impl HealthCheckable for ScriptedReasoningPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::now(
                "scripted-reasoning-port",
                AdapterHealth::Healthy,
                Some("Scripted adapter always healthy".to_string()),
            )
        }
    }

    #[async_trait]
    impl ReasoningPort for ScriptedReasoningPort {
        async fn explain(
            &self,
            _claim: &Claim,
            route: Route,
            missing_fields: &[String],
        ) -> Result<String, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().await.push((route, missing_fields.to_vec()));
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            let next = self.script.lock().await.pop_front();
            next.unwrap_or_else(|| (self.repeat)())
        }
    }
}
