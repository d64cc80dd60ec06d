//! Claim field extraction through Gemini

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::ports::ExtractionPort;

use crate::gemini::{GeminiClient, GenerationParams};

const ADAPTER_ID: &str = "gemini-extraction";

const INSTRUCTION: &str = "You are an expert insurance claims processor. Extract information \
from claim documents and return ONLY valid JSON. Do not include any explanatory text outside \
the JSON structure.";

const SKELETON: &str = r#"{
  "policy_information": {
    "policy_number": "string or null",
    "policyholder_name": "string or null",
    "effective_dates": "string or null"
  },
  "incident_information": {
    "date": "string or null",
    "time": "string or null",
    "location": "string or null",
    "description": "string or null"
  },
  "involved_parties": {
    "claimant": "string or null",
    "third_parties": ["string"] or null,
    "contact_details": "string or null"
  },
  "asset_details": {
    "asset_type": "string or null",
    "asset_id": "string or null",
    "estimated_damage": number or null
  },
  "claim_type": "string or null",
  "attachments": ["string"] or null,
  "initial_estimate": number or null
}"#;

/// Builds the extraction prompt for a document
pub fn extraction_prompt(document_text: &str) -> String {
    format!(
        "{INSTRUCTION}\n\n\
         Extract the following insurance claim information from the document below. \
         Return ONLY a JSON object with the structure shown.\n\n\
         Required JSON structure:\n{SKELETON}\n\n\
         Document text:\n{document_text}\n\n\
         Return ONLY the JSON object, no additional text."
    )
}

/// Parses a model answer into JSON
///
/// Markdown code fences are stripped first. If the remainder still does not
/// parse, the outermost `{...}` slice is tried.
///
/// # Errors
///
/// Returns `PortError::Transformation` when no JSON can be recovered.
pub fn parse_model_json(answer: &str) -> Result<Value, PortError> {
    let stripped = strip_code_fence(answer);
    if let Ok(value) = serde_json::from_str(stripped) {
        return Ok(value);
    }

    let start = stripped.find('{');
    let end = stripped.rfind('}');
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&stripped[start..=end]) {
                debug!("Recovered JSON object from surrounding text");
                return Ok(value);
            }
        }
    }

    Err(PortError::transformation("model answer is not valid JSON"))
}

fn strip_code_fence(answer: &str) -> &str {
    let mut text = answer.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Extraction adapter backed by Gemini
#[derive(Debug, Clone)]
pub struct LlmExtractor {
    client: GeminiClient,
}

impl LlmExtractor {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

impl DomainPort for LlmExtractor {}

#[async_trait]
impl HealthCheckable for LlmExtractor {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.health(ADAPTER_ID)
    }
}

#[async_trait]
impl ExtractionPort for LlmExtractor {
    async fn extract_claim(&self, text: &str) -> Result<Value, PortError> {
        let params = GenerationParams {
            temperature: self.client.config().extraction_temperature,
            max_output_tokens: None,
        };
        let answer = self.client.generate(&extraction_prompt(text), params).await?;
        parse_model_json(&answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        assert_eq!(parse_model_json(r#"{"claim_type":"auto"}"#).unwrap(), json!({"claim_type": "auto"}));
    }

    #[test]
    fn test_fenced_json() {
        let answer = "```json\n{\"claim_type\": \"injury\"}\n```";
        assert_eq!(parse_model_json(answer).unwrap(), json!({"claim_type": "injury"}));
    }

    #[test]
    fn test_bare_fence() {
        let answer = "```\n{\"claim_type\": \"auto\"}\n```";
        assert_eq!(parse_model_json(answer).unwrap()["claim_type"], "auto");
    }

    #[test]
    fn test_json_surrounded_by_prose() {
        let answer = "Here is the claim:\n{\"claim_type\": \"auto\"}\nLet me know if you need more.";
        assert_eq!(parse_model_json(answer).unwrap()["claim_type"], "auto");
    }

    #[test]
    fn test_prose_only_is_transformation_error() {
        let err = parse_model_json("I could not find a claim in this document.").unwrap_err();
        assert!(err.is_transformation());
    }

    #[test]
    fn test_prompt_embeds_document() {
        let prompt = extraction_prompt("Policy POL-1");
        assert!(prompt.contains("Document text:\nPolicy POL-1"));
        assert!(prompt.contains("\"estimated_damage\": number or null"));
    }
}
