//! Request handlers

pub mod claims;
pub mod health;

use crate::error::ApiError;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("No such route".to_string())
}
