//! Refund Claims - API Server Binary
//!
//! This binary starts the HTTP API server for refund claim adjudication.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin refund-claims-api
//!
//! # Run with environment variables
//! API_PORT=8080 OPENAI_API_KEY=sk-... cargo run --bin refund-claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_WARRANTY_DAYS` - Warranty window in days (default: 90)
//! * `API_INFERENCE__OPENAI_API_KEY` or `OPENAI_API_KEY` - Chat model key
//! * `API_INFERENCE__SENTIMENT_API_KEY` or `HF_API_TOKEN` - Sentiment model token
//! * `API_INFERENCE__SENTIMENT_MODEL`, `API_INFERENCE__IMAGE_ANALYSIS_MODEL`,
//!   `API_INFERENCE__REFUND_ESTIMATION_MODEL` - Model overrides

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use infra_inference::InferenceAdapters;
use interface_api::{create_router, config::ApiConfig, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the inference adapters
/// and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        warranty_days = config.warranty_days,
        "Starting Refund Claims API Server"
    );

    let adapters = InferenceAdapters::from_config(&config.inference)
        .context("failed to build inference adapters")?;
    if !config.inference.has_chat_credentials() {
        tracing::warn!("No chat model API key configured; readiness probe will report not ready");
    }

    let pipeline = adapters.pipeline().with_window(config.warranty_window());
    let state = AppState::new(Arc::new(pipeline), config.clone())
        .with_health_checks(adapters.health_checks());
    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
