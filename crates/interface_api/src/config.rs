//! API configuration

use std::fmt;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use core_kernel::{CoreError, RetryPolicy};
use domain_claims::routing::{DEFAULT_FAST_TRACK_THRESHOLD, DEFAULT_INVESTIGATION_KEYWORDS};
use domain_claims::{EmptinessPolicy, RoutingConfig};
use infra_llm::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use infra_llm::LlmConfig;

/// Fallback variable for the model API key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Slack added on top of the model-call budget for local stages
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API configuration
///
/// Every field has a default, so an empty environment yields a runnable
/// (if unauthenticated) server.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    pub log_format: LogFormat,
    /// Key for the hosted model; empty falls back to `GEMINI_API_KEY`
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub extraction_temperature: f32,
    pub reasoning_temperature: f32,
    /// Per-call HTTP timeout for the model
    pub llm_timeout_secs: u64,
    /// Attempts per model call, first one included
    pub max_attempts: u32,
    /// Delay before the first retry; doubles after that
    pub retry_base_delay_ms: u64,
    /// Damage strictly below this is fast-tracked
    pub fast_track_threshold: Decimal,
    pub investigation_keywords: Vec<String>,
    pub zero_amount_is_missing: bool,
    /// Whole-request bound; 0 disables it, unset derives it from the
    /// model-call budget
    pub request_timeout_secs: Option<u64>,
    /// Largest accepted upload
    pub max_upload_bytes: usize,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("gemini_api_key", &"[REDACTED]")
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("retry_base_delay_ms", &self.retry_base_delay_ms)
            .field("fast_track_threshold", &self.fast_track_threshold)
            .field("investigation_keywords", &self.investigation_keywords)
            .field("zero_amount_is_missing", &self.zero_amount_is_missing)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            gemini_api_key: String::new(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            extraction_temperature: 0.0,
            reasoning_temperature: 0.2,
            llm_timeout_secs: 30,
            max_attempts: 3,
            retry_base_delay_ms: 500,
            fast_track_threshold: DEFAULT_FAST_TRACK_THRESHOLD,
            investigation_keywords: DEFAULT_INVESTIGATION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            zero_amount_is_missing: false,
            request_timeout_secs: None,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// `API_INVESTIGATION_KEYWORDS` is a comma-separated list.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut loaded: ApiConfig = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("API")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("investigation_keywords"),
            )
            .build()?
            .try_deserialize()?;

        if loaded.gemini_api_key.trim().is_empty() {
            if let Ok(key) = std::env::var(GEMINI_API_KEY_VAR) {
                loaded.gemini_api_key = key;
            }
        }

        Ok(loaded)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Rejects settings the server cannot start with
    pub fn validate(&self) -> Result<(), CoreError> {
        self.retry_policy()?;
        if self.max_upload_bytes == 0 {
            return Err(CoreError::configuration("max_upload_bytes must be non-zero"));
        }
        if self.llm_timeout_secs == 0 {
            return Err(CoreError::configuration("llm_timeout_secs must be non-zero"));
        }
        if self.fast_track_threshold.is_sign_negative() {
            return Err(CoreError::configuration(format!(
                "fast_track_threshold must not be negative, got {}",
                self.fast_track_threshold
            )));
        }
        if let Some(timeout) = self.request_timeout() {
            if timeout < self.model_call_budget() {
                warn!(
                    request_timeout_secs = timeout.as_secs(),
                    model_call_budget_secs = self.model_call_budget().as_secs(),
                    "Request timeout is shorter than the model-call budget; slow requests may time out before reasoning falls back"
                );
            }
        }
        Ok(())
    }

    /// Retry policy shared by the extraction and reasoning calls
    pub fn retry_policy(&self) -> Result<RetryPolicy, CoreError> {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
            core_kernel::retry::DEFAULT_MULTIPLIER,
        )
    }

    pub fn routing_config(&self) -> RoutingConfig {
        RoutingConfig {
            fast_track_threshold: self.fast_track_threshold,
            investigation_keywords: self.investigation_keywords.clone(),
        }
    }

    pub fn emptiness_policy(&self) -> EmptinessPolicy {
        EmptinessPolicy {
            zero_amount_is_missing: self.zero_amount_is_missing,
        }
    }

    pub fn llm_config(&self) -> LlmConfig {
        let mut llm = LlmConfig::new(self.gemini_api_key.clone())
            .model(self.gemini_model.clone())
            .extraction_temperature(self.extraction_temperature)
            .reasoning_temperature(self.reasoning_temperature)
            .timeout(Duration::from_secs(self.llm_timeout_secs));
        if !self.gemini_base_url.trim().is_empty() {
            llm = llm.base_url(self.gemini_base_url.clone());
        }
        llm
    }

    /// Worst case for the two model calls: every attempt runs into the
    /// HTTP timeout and every backoff wait is taken
    pub fn model_call_budget(&self) -> Duration {
        let policy = self.retry_policy().unwrap_or_default();
        let per_call = Duration::from_secs(self.llm_timeout_secs)
            .saturating_mul(policy.max_attempts())
            .saturating_add(policy.schedule().into_iter().sum());
        per_call.saturating_mul(2)
    }

    /// Bound for one pipeline run
    ///
    /// Unset, it covers the whole model-call budget so a slow extraction
    /// followed by a reasoning outage still ends in fallback reasoning.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(self.model_call_budget().saturating_add(REQUEST_TIMEOUT_MARGIN)),
        }
    }
}
