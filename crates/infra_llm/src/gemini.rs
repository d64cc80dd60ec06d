//! Gemini `generateContent` client
//!
//! One call performs exactly one HTTP request. Retrying is the caller's
//! business; this client only classifies what went wrong so the retry
//! policy can tell transient failures from permanent ones.
//!
//! | Outcome                         | `PortError`          |
//! |---------------------------------|----------------------|
//! | HTTP 429                        | `RateLimited`        |
//! | HTTP 5xx                        | `ServiceUnavailable` |
//! | HTTP 401 / 403                  | `Unauthorized`       |
//! | other non-success status        | `Internal`           |
//! | request timed out               | `Timeout`            |
//! | connect / transport failure     | `Connection`         |
//! | undecodable body, no text       | `Transformation`     |

use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{AdapterHealth, HealthCheckResult, PortError};

use crate::config::LlmConfig;

const SERVICE: &str = "gemini";

/// Wait suggested to the caller when a 429 carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Sampling settings for a single generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// HTTP client for the Gemini REST API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl GeminiClient {
    /// Creates a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `PortError::Internal` if the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, PortError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PortError::Internal {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends one prompt and returns the model's text answer
    pub async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, PortError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_output_tokens,
            },
        };

        debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            temperature = params.temperature,
            "Sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = retry_after_secs(&response);
            let detail = response.text().await.unwrap_or_default();
            return Err(status_error(status, retry_after, &detail));
        }

        let envelope: GenerateResponse = response.json().await.map_err(|e| {
            PortError::transformation(format!("undecodable generateContent response: {e}"))
        })?;

        envelope
            .into_text()
            .ok_or_else(|| PortError::transformation("generateContent response carried no text"))
    }

    fn transport_error(&self, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            let timeout_ms = u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX);
            PortError::timeout("generateContent", timeout_ms)
        } else if error.is_builder() {
            PortError::Internal {
                message: "invalid generateContent request".to_string(),
                source: Some(Box::new(error)),
            }
        } else {
            PortError::Connection {
                message: format!("{SERVICE} request failed"),
                source: Some(Box::new(error)),
            }
        }
    }

    /// Reports whether the adapter is usable without calling the API
    pub fn health(&self, adapter_id: &str) -> HealthCheckResult {
        if self.config.has_api_key() {
            HealthCheckResult::now(
                adapter_id,
                AdapterHealth::Healthy,
                Some(format!("model {} configured", self.config.model)),
            )
        } else {
            HealthCheckResult::now(
                adapter_id,
                AdapterHealth::Unhealthy,
                Some("no API key configured".to_string()),
            )
        }
    }
}

fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn status_error(status: StatusCode, retry_after: Option<u64>, detail: &str) -> PortError {
    let detail = detail.trim();
    match status {
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{SERVICE} rejected credentials ({status})"),
        },
        s if s.is_server_error() => PortError::unavailable(format!("{SERVICE} ({status})")),
        _ => PortError::internal(format!("{SERVICE} returned {status}: {detail}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, Some(7), ""),
            PortError::RateLimited { retry_after_secs: 7 }
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, None, ""),
            PortError::RateLimited { retry_after_secs: 1 }
        ));
        assert!(status_error(StatusCode::BAD_GATEWAY, None, "").is_transient());
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, None, ""),
            PortError::Unauthorized { .. }
        ));
        assert!(!status_error(StatusCode::BAD_REQUEST, None, "bad").is_transient());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let envelope: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] } }]
        }))
        .unwrap();
        assert_eq!(envelope.into_text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let envelope: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(envelope.into_text().is_none());
    }

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new(LlmConfig::new("k").base_url("http://localhost:9999/")).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/models/gemini-2.5-flash:generateContent"
        );
    }
}
