//! HTTP API Layer
//!
//! This crate exposes the claim decision pipeline over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: FNOL upload processing, health and readiness
//! - **Middleware**: Request ids, tracing, audit logging
//! - **DTOs**: Response bodies
//! - **Error Handling**: Consistent `{error, message}` error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, config::ApiConfig};
//!
//! let state = AppState::gemini(ApiConfig::from_env()?)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_claims::{
    ClaimPipeline, ExtractionPort, FieldValidator, MandatoryFieldSpec, ReasoningPort,
    ResilientOrchestrator, RoutingEngine,
};
use infra_llm::{GeminiClient, LlmExtractor, LlmReasoner};

use crate::config::ApiConfig;
use crate::error::StartupError;
use crate::handlers::{claims, health};
use crate::middleware::audit_middleware;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ClaimPipeline>,
    pub config: ApiConfig,
    /// Collaborators reported by the readiness check
    pub adapters: Vec<Arc<dyn HealthCheckable>>,
}

impl AppState {
    /// Wires the pipeline from configuration around the given ports
    ///
    /// # Errors
    ///
    /// Returns `StartupError::Config` if the configuration is invalid
    pub fn new(
        config: ApiConfig,
        extraction: Arc<dyn ExtractionPort>,
        reasoning: Arc<dyn ReasoningPort>,
        adapters: Vec<Arc<dyn HealthCheckable>>,
    ) -> Result<Self, StartupError> {
        config.validate()?;

        let retry = config.retry_policy()?;
        let orchestrator = ResilientOrchestrator::new(extraction, reasoning)
            .with_extraction_policy(retry)
            .with_reasoning_policy(retry);
        let validator = FieldValidator::new(MandatoryFieldSpec::standard(), config.emptiness_policy());
        let engine = RoutingEngine::standard(&config.routing_config());

        let mut pipeline = ClaimPipeline::new(orchestrator, validator, engine);
        if let Some(timeout) = config.request_timeout() {
            pipeline = pipeline.with_request_timeout(timeout);
        }

        Ok(Self {
            pipeline: Arc::new(pipeline),
            config,
            adapters,
        })
    }

    /// Wires the pipeline against the hosted Gemini model
    ///
    /// # Errors
    ///
    /// Returns `StartupError` if the configuration is invalid or the HTTP
    /// client cannot be built
    pub fn gemini(config: ApiConfig) -> Result<Self, StartupError> {
        let client = GeminiClient::new(config.llm_config())?;
        let extractor = Arc::new(LlmExtractor::new(client.clone()));
        let reasoner = Arc::new(LlmReasoner::new(client));

        let adapters: Vec<Arc<dyn HealthCheckable>> = vec![
            extractor.clone() as Arc<dyn HealthCheckable>,
            reasoner.clone() as Arc<dyn HealthCheckable>,
        ];
        Self::new(config, extractor, reasoner, adapters)
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Pipeline, configuration and collaborators
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    let public_routes = Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/process-claim", post(claims::process_claim))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .merge(public_routes)
        .merge(claims_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
