//! Routing explanations
//!
//! The reasoning model explains a decision in prose. When it cannot, the
//! explanation is built here from the rule that fired, so every decision
//! carries a non-empty reason.

use serde::{Deserialize, Serialize};

use crate::routing::{RouteTrigger, RoutingOutcome};

/// Where a reasoning text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningSource {
    /// Written by the reasoning model
    Model,
    /// Synthesized locally after the model was unavailable
    Fallback,
}

/// Explanation attached to a decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reasoning {
    pub text: String,
    pub source: ReasoningSource,
}

impl Reasoning {
    pub fn from_model(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ReasoningSource::Model,
        }
    }

    /// Deterministic explanation for a routing outcome
    pub fn fallback(outcome: &RoutingOutcome) -> Self {
        Self {
            text: fallback_reasoning(outcome),
            source: ReasoningSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ReasoningSource::Fallback
    }
}

/// Builds a one-sentence explanation naming the condition that fired
///
/// Pure and never empty; the same outcome always yields the same text.
pub fn fallback_reasoning(outcome: &RoutingOutcome) -> String {
    let route = outcome.route;
    match &outcome.trigger {
        RouteTrigger::MissingFields(fields) => format!(
            "Claim routed to {route} due to missing mandatory fields: {}.",
            fields.join(", ")
        ),
        RouteTrigger::DamageBelowThreshold { damage, threshold } => format!(
            "Claim routed to {route} because the estimated damage of {} is below the fast-track threshold of {}.",
            damage.round_dp(2).normalize(),
            threshold.round_dp(2).normalize()
        ),
        RouteTrigger::InvestigationKeyword(keyword) => format!(
            "Claim routed to {route} because the incident description contains the keyword \"{keyword}\"."
        ),
        RouteTrigger::InjuryClaimType => format!(
            "Claim routed to {route} due to injury claim type requiring specialist review."
        ),
        RouteTrigger::Default => {
            format!("Claim routed to {route} as no specific routing rule applied.")
        }
    }
}
