//! FNOL Claims Triage - API Server Binary
//!
//! This binary starts the HTTP API server for the claim decision pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! GEMINI_API_KEY=... cargo run --bin claims-api
//!
//! # Run with environment variables
//! API_PORT=9000 API_LOG_FORMAT=json API_FAST_TRACK_THRESHOLD=10000 cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` / `API_PORT` - Bind address (default: 0.0.0.0:8000)
//! * `API_LOG_LEVEL` - trace, debug, info, warn, error (default: info); `RUST_LOG` wins
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_GEMINI_API_KEY` - Model API key, falling back to `GEMINI_API_KEY`
//! * `API_GEMINI_MODEL` / `API_GEMINI_BASE_URL` - Model selection
//! * `API_MAX_ATTEMPTS` / `API_RETRY_BASE_DELAY_MS` - Retry policy (default: 3, 500ms; at most 3 attempts)
//! * `API_FAST_TRACK_THRESHOLD` - Fast-track damage ceiling (default: 25000)
//! * `API_INVESTIGATION_KEYWORDS` - Comma list (default: fraud,inconsistent,staged)
//! * `API_REQUEST_TIMEOUT_SECS` - Whole-request bound, 0 for none (default: model-call budget + 5s, 188s with the defaults)
//! * `API_MAX_UPLOAD_BYTES` - Upload size limit (default: 10 MiB)

use std::net::SocketAddr;

use anyhow::Context;
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::{create_router, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded or is invalid
/// - The model client cannot be built
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("failed to load API configuration")?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        model = %config.gemini_model,
        max_attempts = config.max_attempts,
        "Starting FNOL claims triage API server"
    );

    if config.gemini_api_key.trim().is_empty() {
        tracing::warn!("No model API key configured; extraction requests will fail");
    }

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server_addr()))?;

    let state = AppState::gemini(config).context("failed to initialise claim pipeline")?;
    let app = create_router(state);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests are allowed to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
