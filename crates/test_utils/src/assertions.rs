//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for claim outcomes that give
//! more meaningful error messages than standard assertions.

use domain_claims::{ClaimError, ClaimRecord, RefundStatus};

pub const STALE_REASON: &str =
    "Claim submitted after 90 days. The product is no longer in warranty.";
pub const PROCESSING_FAILURE_REASON: &str =
    "Error processing refund request. Please try again later.";

/// Asserts that a claim was rejected for being outside the 90-day window
pub fn assert_rejected_stale(claim: &ClaimRecord) {
    assert_eq!(
        claim.refund_status(),
        &RefundStatus::Rejected,
        "Expected a stale rejection, got status {}",
        claim.refund_status()
    );
    assert!(
        claim.refund_amount().is_zero(),
        "Stale rejection must refund nothing, got {}",
        claim.refund_amount()
    );
    assert_eq!(claim.refund_reason(), Some(STALE_REASON));
    assert!(claim.is_finalized());
}

/// Asserts that a claim carries the estimator fallback outcome
pub fn assert_processing_failure(claim: &ClaimRecord) {
    assert_eq!(
        claim.refund_status(),
        &RefundStatus::NotSuccessfullyProcessed,
        "Expected the processing failure outcome, got status {}",
        claim.refund_status()
    );
    assert!(
        claim.refund_amount().is_zero(),
        "Processing failure must refund nothing, got {}",
        claim.refund_amount()
    );
    assert_eq!(claim.refund_reason(), Some(PROCESSING_FAILURE_REASON));
    assert!(claim.refund_notes().is_none());
    assert_eq!(claim.refund_amount().currency(), claim.currency());
}

/// Asserts that a submission was rejected because of `field`
pub fn assert_malformed_field(result: &Result<ClaimRecord, ClaimError>, field: &str) {
    match result {
        Err(ClaimError::MalformedInput { field: actual, .. }) => assert_eq!(
            actual, field,
            "Expected malformed input on '{}', got '{}'",
            field, actual
        ),
        Err(other) => panic!("Expected malformed input on '{}', got {:?}", field, other),
        Ok(claim) => panic!(
            "Expected malformed input on '{}', claim {} was accepted",
            field,
            claim.claim_id()
        ),
    }
}
