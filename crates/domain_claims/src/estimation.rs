//! Refund decisions and estimator failures

use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{Currency, Money, PortError};
use crate::claim::RefundStatus;

pub(crate) const PROCESSING_FAILURE_REASON: &str =
    "Error processing refund request. Please try again later.";

/// Outcome written onto a claim record when it reaches a terminal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundDecision {
    pub refund_amount: Money,
    pub refund_status: RefundStatus,
    pub refund_reason: String,
    pub refund_notes: Option<String>,
}

impl RefundDecision {
    /// Rejection for a claim filed outside a warranty window of `window_days`
    pub fn stale_rejection(window_days: u32, currency: Currency) -> Self {
        Self {
            refund_amount: Money::zero(currency),
            refund_status: RefundStatus::Rejected,
            refund_reason: format!(
                "Claim submitted after {} days. The product is no longer in warranty.",
                window_days
            ),
            refund_notes: None,
        }
    }

    /// Fallback used whenever the estimator could not produce a decision
    pub fn processing_failure(currency: Currency) -> Self {
        Self {
            refund_amount: Money::zero(currency),
            refund_status: RefundStatus::NotSuccessfullyProcessed,
            refund_reason: PROCESSING_FAILURE_REASON.to_string(),
            refund_notes: None,
        }
    }
}

/// Errors returned by a refund estimator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    #[error("Refund estimation backend failed: {0}")]
    Backend(String),

    #[error("Refund estimator unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid refund decision: {0}")]
    InvalidDecision(String),

    #[error("Refund estimation aborted: {0}")]
    Aborted(String),
}

impl From<PortError> for EstimatorError {
    fn from(error: PortError) -> Self {
        if error.is_transient() {
            EstimatorError::Unavailable(error.to_string())
        } else if error.is_malformed_response() {
            EstimatorError::InvalidDecision(error.to_string())
        } else {
            EstimatorError::Backend(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_rejection_text() {
        let decision = RefundDecision::stale_rejection(90, Currency::USD);
        assert_eq!(
            decision.refund_reason,
            "Claim submitted after 90 days. The product is no longer in warranty."
        );
        assert!(decision.refund_amount.is_zero());
        assert_eq!(decision.refund_status, RefundStatus::Rejected);
    }

    #[test]
    fn test_processing_failure_has_no_notes() {
        let decision = RefundDecision::processing_failure(Currency::EUR);
        assert_eq!(decision.refund_status, RefundStatus::NotSuccessfullyProcessed);
        assert_eq!(decision.refund_amount, Money::zero(Currency::EUR));
        assert!(decision.refund_notes.is_none());
    }

    #[test]
    fn test_port_error_conversion() {
        let err: EstimatorError = PortError::Timeout {
            operation: "chat_completion".into(),
            duration_ms: 30_000,
        }
        .into();
        assert!(matches!(err, EstimatorError::Unavailable(_)));

        let err: EstimatorError = PortError::transformation("not json").into();
        assert!(matches!(err, EstimatorError::InvalidDecision(_)));
    }
}
