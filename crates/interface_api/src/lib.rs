//! HTTP API Layer
//!
//! This crate exposes refund claim adjudication over REST using Axum, plus
//! the `claims-cli` command-line entry point.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims and health probes
//! - **Middleware**: Tracing and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(Arc::new(pipeline), config).with_health_checks(checks);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use core_kernel::HealthCheckable;
use domain_claims::AdjudicationPipeline;

use crate::config::ApiConfig;
use crate::middleware::audit_middleware;
use crate::handlers::{claims, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AdjudicationPipeline>,
    pub config: ApiConfig,
    pub health_checks: Vec<Arc<dyn HealthCheckable>>,
}

impl AppState {
    pub fn new(pipeline: Arc<AdjudicationPipeline>, config: ApiConfig) -> Self {
        Self {
            pipeline,
            config,
            health_checks: Vec::new(),
        }
    }

    /// Adapters consulted by the readiness probe
    pub fn with_health_checks(mut self, checks: Vec<Arc<dyn HealthCheckable>>) -> Self {
        self.health_checks = checks;
        self
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/adjudicate", post(claims::adjudicate_claim));

    // Audited API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
