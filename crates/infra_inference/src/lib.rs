//! Inference Infrastructure Layer
//!
//! This crate provides the HTTP adapters behind the claims domain ports:
//!
//! - [`HttpSentimentAnalyzer`] classifies review text through a hosted
//!   text-classification model
//! - [`VisionDefectAnalyzer`] sends product photos to a vision chat model
//! - [`LlmRefundEstimator`] asks a chat model for a structured refund decision
//!
//! Every backend reply is decoded into a typed struct and validated here, so
//! the adjudication pipeline only ever sees domain results or error markers.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_inference::{InferenceConfig, InferenceAdapters};
//!
//! let adapters = InferenceAdapters::from_config(&InferenceConfig::default())?;
//! let pipeline = adapters.pipeline();
//! ```

pub mod config;
pub mod error;
pub mod client;
pub mod images;
pub mod prompts;
pub mod sentiment;
pub mod vision;
pub mod estimator;

use std::sync::Arc;

use core_kernel::HealthCheckable;
use domain_claims::AdjudicationPipeline;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use client::ChatClient;
pub use sentiment::HttpSentimentAnalyzer;
pub use vision::VisionDefectAnalyzer;
pub use estimator::LlmRefundEstimator;

/// The three production adapters built from one configuration
#[derive(Clone)]
pub struct InferenceAdapters {
    pub sentiment: Arc<HttpSentimentAnalyzer>,
    pub defect: Arc<VisionDefectAnalyzer>,
    pub estimator: Arc<LlmRefundEstimator>,
}

impl InferenceAdapters {
    pub fn from_config(config: &InferenceConfig) -> Result<Self, InferenceError> {
        Ok(Self {
            sentiment: Arc::new(HttpSentimentAnalyzer::new(config)?),
            defect: Arc::new(VisionDefectAnalyzer::new(config)?),
            estimator: Arc::new(LlmRefundEstimator::new(config)?),
        })
    }

    /// Builds an adjudication pipeline wired to these adapters
    pub fn pipeline(&self) -> AdjudicationPipeline {
        AdjudicationPipeline::new(
            self.sentiment.clone(),
            self.defect.clone(),
            self.estimator.clone(),
        )
    }

    /// Adapters as health-checkable handles, for readiness probes
    pub fn health_checks(&self) -> Vec<Arc<dyn HealthCheckable>> {
        vec![
            self.sentiment.clone() as Arc<dyn HealthCheckable>,
            self.defect.clone(),
            self.estimator.clone(),
        ]
    }
}
