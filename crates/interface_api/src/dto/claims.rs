//! Claims DTOs

use serde::{Deserialize, Serialize};

use domain_claims::{Claim, Decision, Route};

/// Body of a successful `POST /process-claim`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessClaimResponse {
    pub extracted_fields: Claim,
    /// Dotted paths, in mandatory-field order
    pub missing_fields: Vec<String>,
    pub recommended_route: Route,
    pub reasoning: String,
}

impl From<Decision> for ProcessClaimResponse {
    fn from(decision: Decision) -> Self {
        let (claim, missing_fields, route, reasoning) = decision.into_parts();
        Self {
            extracted_fields: claim,
            missing_fields,
            recommended_route: route,
            reasoning: reasoning.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::Reasoning;

    #[test]
    fn test_wire_field_names() {
        let decision = Decision::assemble(
            Claim::default(),
            vec!["claim_type".to_string()],
            Route::ManualReview,
            Reasoning::from_model("Claim type is missing."),
        );

        let body = serde_json::to_value(ProcessClaimResponse::from(decision)).unwrap();
        assert_eq!(body["extractedFields"], serde_json::json!({}));
        assert_eq!(body["missingFields"], serde_json::json!(["claim_type"]));
        assert_eq!(body["recommendedRoute"], "Manual review");
        assert_eq!(body["reasoning"], "Claim type is missing.");
    }
}
