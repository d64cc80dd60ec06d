//! Routing explanations through Gemini

use async_trait::async_trait;
use serde_json::json;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::claim::Claim;
use domain_claims::ports::ReasoningPort;
use domain_claims::routing::Route;

use crate::gemini::{GeminiClient, GenerationParams};

const ADAPTER_ID: &str = "gemini-reasoning";

const INSTRUCTION: &str = "You are an insurance claims processing expert. Provide concise, \
professional reasoning explanations for claim routing decisions.";

/// Characters of the incident description shown to the model
const DESCRIPTION_PREVIEW_CHARS: usize = 200;

fn description_preview(description: &str) -> String {
    let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{preview}...")
}

/// Builds the explanation prompt for a routed claim
pub fn reasoning_prompt(claim: &Claim, route: Route, missing_fields: &[String]) -> String {
    let summary = json!({
        "policy_number": claim.policy_number(),
        "claim_type": claim.claim_type.as_deref(),
        "estimated_damage": claim.estimated_damage().map(|d| d.normalize().to_string()),
        "incident_date": claim.incident_date(),
        "description_preview": claim.description().map(description_preview),
    });
    let missing = if missing_fields.is_empty() {
        "None".to_string()
    } else {
        missing_fields.join(", ")
    };

    format!(
        "{INSTRUCTION}\n\n\
         Generate a short, professional reasoning explanation (2-3 sentences) for why this \
         insurance claim was routed to \"{route}\".\n\n\
         Claim Summary:\n{summary}\n\n\
         Missing Fields: {missing}\n\n\
         Provide a concise explanation that references the specific business rules or data \
         points that led to this routing decision."
    )
}

/// Reasoning adapter backed by Gemini
#[derive(Debug, Clone)]
pub struct LlmReasoner {
    client: GeminiClient,
}

impl LlmReasoner {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

impl DomainPort for LlmReasoner {}

#[async_trait]
impl HealthCheckable for LlmReasoner {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.health(ADAPTER_ID)
    }
}

#[async_trait]
impl ReasoningPort for LlmReasoner {
    async fn explain(
        &self,
        claim: &Claim,
        route: Route,
        missing_fields: &[String],
    ) -> Result<String, PortError> {
        let config = self.client.config();
        let params = GenerationParams {
            temperature: config.reasoning_temperature,
            max_output_tokens: Some(config.reasoning_max_output_tokens),
        };
        let answer = self
            .client
            .generate(&reasoning_prompt(claim, route, missing_fields), params)
            .await?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(PortError::transformation("reasoning answer was empty"));
        }
        Ok(answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::claim::IncidentInformation;

    #[test]
    fn test_prompt_names_route_and_missing_fields() {
        let prompt = reasoning_prompt(
            &Claim::default(),
            Route::ManualReview,
            &["claim_type".to_string(), "incident_information.date".to_string()],
        );
        assert!(prompt.contains("routed to \"Manual review\""));
        assert!(prompt.contains("Missing Fields: claim_type, incident_information.date"));
    }

    #[test]
    fn test_prompt_without_missing_fields() {
        let prompt = reasoning_prompt(&Claim::default(), Route::StandardProcessing, &[]);
        assert!(prompt.contains("Missing Fields: None"));
    }

    #[test]
    fn test_description_preview_is_truncated() {
        let claim = Claim {
            incident_information: Some(IncidentInformation {
                description: Some("x".repeat(500)),
                ..Default::default()
            }),
            ..Default::default()
        };
        let prompt = reasoning_prompt(&claim, Route::StandardProcessing, &[]);
        assert!(prompt.contains(&format!("{}...", "x".repeat(200))));
        assert!(!prompt.contains(&"x".repeat(201)));
    }
}
