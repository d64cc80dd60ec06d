//! Resilient Call Orchestrator
//!
//! Wraps the two model collaborators with bounded retries. Both calls share
//! the [`RetryPolicy`] machinery but differ on exhaustion:
//!
//! - extraction has no fallback, so running out of attempts fails the request;
//! - reasoning degrades to a locally synthesized explanation and never fails.
//!
//! A structurally unusable extraction answer is not retried. The model runs
//! at a fixed temperature, so asking again for the same text is unlikely to
//! fix its shape.

use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::{PortError, RetryError, RetryPolicy};

use crate::claim::Claim;
use crate::error::{ClaimError, MalformedClaimError};
use crate::ports::{ExtractionPort, ReasoningPort};
use crate::reasoning::Reasoning;
use crate::routing::RoutingOutcome;

/// Retry-wrapped access to the extraction and reasoning collaborators
#[derive(Clone)]
pub struct ResilientOrchestrator {
    extraction: Arc<dyn ExtractionPort>,
    reasoning: Arc<dyn ReasoningPort>,
    extraction_policy: RetryPolicy,
    reasoning_policy: RetryPolicy,
}

impl std::fmt::Debug for ResilientOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientOrchestrator")
            .field("extraction_policy", &self.extraction_policy)
            .field("reasoning_policy", &self.reasoning_policy)
            .finish_non_exhaustive()
    }
}

impl ResilientOrchestrator {
    /// Creates an orchestrator using the default policy for both calls
    pub fn new(extraction: Arc<dyn ExtractionPort>, reasoning: Arc<dyn ReasoningPort>) -> Self {
        Self {
            extraction,
            reasoning,
            extraction_policy: RetryPolicy::default(),
            reasoning_policy: RetryPolicy::default(),
        }
    }

    pub fn with_extraction_policy(mut self, policy: RetryPolicy) -> Self {
        self.extraction_policy = policy;
        self
    }

    pub fn with_reasoning_policy(mut self, policy: RetryPolicy) -> Self {
        self.reasoning_policy = policy;
        self
    }

    pub fn extraction_policy(&self) -> &RetryPolicy {
        &self.extraction_policy
    }

    pub fn reasoning_policy(&self) -> &RetryPolicy {
        &self.reasoning_policy
    }

    /// Obtains a typed claim from document text
    ///
    /// # Errors
    ///
    /// - `ClaimError::MalformedClaim` if the answer is not JSON or cannot be
    ///   coerced into a claim (never retried)
    /// - `ClaimError::ExtractionUnavailable` if transient failures used up
    ///   every attempt, or the collaborator failed in a way retrying cannot fix
    pub async fn extract(&self, text: &str) -> Result<Claim, ClaimError> {
        let extraction = &self.extraction;
        let raw = self
            .extraction_policy
            .run("extract_claim", move |_attempt| extraction.extract_claim(text))
            .await
            .map_err(|error| match error {
                RetryError::Rejected {
                    error: PortError::Transformation { message },
                    ..
                } => ClaimError::MalformedClaim(MalformedClaimError::unparsable(message)),
                other => ClaimError::ExtractionUnavailable {
                    attempts: other.attempts(),
                    cause: other.into_port_error(),
                },
            })?;

        let claim = Claim::coerce(raw)?;
        info!(stage = "extraction", "Candidate claim coerced");
        Ok(claim)
    }

    /// Explains a routing outcome
    ///
    /// Never fails. If the collaborator gives up, or answers with nothing,
    /// the explanation is synthesized from the outcome and no further
    /// reasoning call is made.
    pub async fn explain(
        &self,
        claim: &Claim,
        outcome: &RoutingOutcome,
        missing_fields: &[String],
    ) -> Reasoning {
        let reasoning = &self.reasoning;
        let result = self
            .reasoning_policy
            .run("explain_route", move |_attempt| {
                reasoning.explain(claim, outcome.route, missing_fields)
            })
            .await;

        match result {
            Ok(text) if !text.trim().is_empty() => {
                info!(stage = "reasoning", route = %outcome.route, "Model reasoning obtained");
                Reasoning::from_model(text.trim())
            }
            Ok(_) => {
                warn!(
                    stage = "reasoning",
                    route = %outcome.route,
                    degraded = true,
                    "Reasoning model returned an empty answer, using fallback reasoning"
                );
                Reasoning::fallback(outcome)
            }
            Err(error) => {
                warn!(
                    stage = "reasoning",
                    route = %outcome.route,
                    attempts = error.attempts(),
                    error_kind = error.port_error().kind(),
                    degraded = true,
                    "Reasoning unavailable, using fallback reasoning: {error}"
                );
                Reasoning::fallback(outcome)
            }
        }
    }
}
