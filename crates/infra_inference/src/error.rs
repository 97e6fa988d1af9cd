//! Adapter construction errors

use thiserror::Error;

/// Errors raised while building inference adapters
///
/// Request-time failures are reported as `PortError` instead.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Invalid inference configuration for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

impl InferenceError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        InferenceError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
