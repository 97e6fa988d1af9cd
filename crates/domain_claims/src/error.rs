//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The submission could not be turned into a claim record
    #[error("Malformed claim input for {field}: {message}")]
    MalformedInput { field: String, message: String },

    #[error("Claim {claim_id} already finalized")]
    AlreadyFinalized { claim_id: String },

    #[error("Refund currency {refund} does not match claim currency {claim}")]
    CurrencyMismatch { claim: String, refund: String },
}

impl ClaimError {
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClaimError::MalformedInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for input errors the caller must correct
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, ClaimError::MalformedInput { .. })
    }
}
