//! The decision record returned for each processed claim

use crate::claim::Claim;
use crate::reasoning::{Reasoning, ReasoningSource};
use crate::routing::Route;

/// Immutable outcome of the claim pipeline
///
/// Built once by [`Decision::assemble`]; there are no setters. The missing
/// field list is the validator's output, carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    claim: Claim,
    missing_fields: Vec<String>,
    route: Route,
    reasoning: Reasoning,
}

impl Decision {
    /// Combines the pipeline's stage outputs
    pub fn assemble(
        claim: Claim,
        missing_fields: Vec<String>,
        route: Route,
        reasoning: Reasoning,
    ) -> Self {
        Self {
            claim,
            missing_fields,
            route,
            reasoning,
        }
    }

    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    pub fn missing_fields(&self) -> &[String] {
        &self.missing_fields
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning.text
    }

    pub fn reasoning_source(&self) -> ReasoningSource {
        self.reasoning.source
    }

    /// True when the claim lacked at least one mandatory field
    pub fn is_incomplete(&self) -> bool {
        !self.missing_fields.is_empty()
    }

    /// Splits the decision into its parts
    pub fn into_parts(self) -> (Claim, Vec<String>, Route, Reasoning) {
        (self.claim, self.missing_fields, self.route, self.reasoning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_echoes_inputs() {
        let missing = vec!["claim_type".to_string()];
        let decision = Decision::assemble(
            Claim::default(),
            missing.clone(),
            Route::ManualReview,
            Reasoning::from_model("Needs a claim type."),
        );

        assert_eq!(decision.missing_fields(), missing.as_slice());
        assert_eq!(decision.route(), Route::ManualReview);
        assert_eq!(decision.reasoning(), "Needs a claim type.");
        assert_eq!(decision.reasoning_source(), ReasoningSource::Model);
        assert!(decision.is_incomplete());
    }
}
