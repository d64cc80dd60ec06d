//! Hosted Language-Model Adapters
//!
//! Implements the claim pipeline's extraction and reasoning ports against
//! the Gemini `generateContent` REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_llm::{GeminiClient, LlmConfig, LlmExtractor, LlmReasoner};
//!
//! let client = GeminiClient::new(LlmConfig::new(api_key))?;
//! let extraction = Arc::new(LlmExtractor::new(client.clone()));
//! let reasoning = Arc::new(LlmReasoner::new(client));
//! ```
//!
//! The adapters make one HTTP request per call. Retries and fallbacks are
//! applied by the domain's orchestrator.

pub mod config;
pub mod gemini;
pub mod extractor;
pub mod reasoner;

pub use config::LlmConfig;
pub use gemini::{GeminiClient, GenerationParams};
pub use extractor::LlmExtractor;
pub use reasoner::LlmReasoner;
