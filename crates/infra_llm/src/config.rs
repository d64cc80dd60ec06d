//! Hosted model configuration

use std::fmt;
use std::time::Duration;

/// Public Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for both extraction and reasoning
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Settings for the Gemini adapters
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_llm::LlmConfig;
///
/// let config = LlmConfig::new("secret-key")
///     .model("gemini-2.5-pro")
///     .timeout(Duration::from_secs(20));
///
/// assert!(!format!("{:?}", config).contains("secret-key"));
/// ```
#[derive(Clone)]
pub struct LlmConfig {
    /// API key sent as `x-goog-api-key`
    pub api_key: String,
    /// REST endpoint root, without a trailing slash
    pub base_url: String,
    /// Model name, e.g. `gemini-2.5-flash`
    pub model: String,
    /// Sampling temperature for field extraction
    pub extraction_temperature: f32,
    /// Sampling temperature for routing explanations
    pub reasoning_temperature: f32,
    /// Output cap for routing explanations
    pub reasoning_max_output_tokens: u32,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("extraction_temperature", &self.extraction_temperature)
            .field("reasoning_temperature", &self.reasoning_temperature)
            .field("reasoning_max_output_tokens", &self.reasoning_max_output_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmConfig {
    /// Creates a configuration with the given API key and defaults elsewhere
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            extraction_temperature: 0.0,
            reasoning_temperature: 0.2,
            reasoning_max_output_tokens: 200,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the endpoint root; a trailing slash is dropped
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn extraction_temperature(mut self, temperature: f32) -> Self {
        self.extraction_temperature = temperature;
        self
    }

    pub fn reasoning_temperature(mut self, temperature: f32) -> Self {
        self.reasoning_temperature = temperature;
        self
    }

    pub fn reasoning_max_output_tokens(mut self, tokens: u32) -> Self {
        self.reasoning_max_output_tokens = tokens;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when an API key has been supplied
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
