//! Claim Decision Pipeline
//!
//! Runs one claim through the five stages, strictly in sequence:
//!
//! ```text
//! text -> extract -> validate -> route -> explain -> assemble -> Decision
//! ```
//!
//! The pipeline holds no per-request state, so one instance can serve any
//! number of concurrent requests behind an `Arc`.

use std::time::Duration;

use tracing::{info, Instrument};

use core_kernel::RequestId;

use crate::decision::Decision;
use crate::error::ClaimError;
use crate::orchestrator::ResilientOrchestrator;
use crate::routing::RoutingEngine;
use crate::validation::FieldValidator;

/// End-to-end claim processing
#[derive(Debug)]
pub struct ClaimPipeline {
    orchestrator: ResilientOrchestrator,
    validator: FieldValidator,
    engine: RoutingEngine,
    request_timeout: Option<Duration>,
}

impl ClaimPipeline {
    pub fn new(
        orchestrator: ResilientOrchestrator,
        validator: FieldValidator,
        engine: RoutingEngine,
    ) -> Self {
        Self {
            orchestrator,
            validator,
            engine,
            request_timeout: None,
        }
    }

    /// Bounds the whole pipeline run, backoff waits included
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn validator(&self) -> &FieldValidator {
        &self.validator
    }

    pub fn engine(&self) -> &RoutingEngine {
        &self.engine
    }

    /// Processes one claim document's text into a decision
    ///
    /// # Errors
    ///
    /// - `ClaimError::MalformedClaim` if the extracted structure is unusable
    /// - `ClaimError::ExtractionUnavailable` if extraction could not be reached
    /// - `ClaimError::RequestTimeout` if the configured request timeout elapsed
    ///
    /// Reasoning failures are never errors; they yield fallback reasoning.
    pub async fn process(&self, request_id: RequestId, text: &str) -> Result<Decision, ClaimError> {
        let span = tracing::info_span!("process_claim", request_id = %request_id);

        let run = self.run(text).instrument(span.clone());
        match self.request_timeout {
            None => run.await,
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => {
                    let timeout_ms = millis(limit);
                    span.in_scope(|| {
                        tracing::error!(timeout_ms, "Claim processing timed out");
                    });
                    Err(ClaimError::RequestTimeout { timeout_ms })
                }
            },
        }
    }

    async fn run(&self, text: &str) -> Result<Decision, ClaimError> {
        let claim = self.orchestrator.extract(text).await?;

        let missing_fields = self.validator.validate(&claim);
        info!(
            stage = "validation",
            missing_count = missing_fields.len(),
            "Mandatory fields checked"
        );

        let outcome = self.engine.evaluate(&claim, &missing_fields);

        let reasoning = self
            .orchestrator
            .explain(&claim, &outcome, &missing_fields)
            .await;

        let decision = Decision::assemble(claim, missing_fields, outcome.route, reasoning);
        info!(
            stage = "assembly",
            route = %decision.route(),
            reasoning_source = ?decision.reasoning_source(),
            "Decision assembled"
        );
        Ok(decision)
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
