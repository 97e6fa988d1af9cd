//! Claims DTOs
//!
//! Requests are decoded straight into [`ClaimSubmission`]; validation
//! happens when the pipeline opens the claim record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_claims::ClaimRecord;

pub use domain_claims::ClaimSubmission as AdjudicateClaimRequest;

/// A finalized claim record
///
/// Amounts are emitted exactly as stored on the record, without rounding to
/// the currency's minor unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecordResponse {
    pub claim_id: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub order_id: String,
    pub order_date: NaiveDate,
    pub claim_date: NaiveDate,
    pub product_id: String,
    pub product_name: String,
    pub product_description: String,
    pub product_cost: Decimal,
    pub currency: String,
    pub product_review: String,
    /// Paths, or a short label for inline images
    pub product_images: Vec<String>,
    pub refund_amount: Decimal,
    pub refund_status: String,
    pub refund_reason: Option<String>,
    pub refund_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

impl From<&ClaimRecord> for ClaimRecordResponse {
    fn from(claim: &ClaimRecord) -> Self {
        Self {
            claim_id: claim.claim_id().to_string(),
            customer_id: claim.customer_id.clone(),
            customer_name: claim.customer_name.clone(),
            order_id: claim.order_id.clone(),
            order_date: claim.order_date,
            claim_date: claim.claim_date,
            product_id: claim.product_id.clone(),
            product_name: claim.product_name.clone(),
            product_description: claim.product_description.clone(),
            product_cost: claim.product_cost.amount(),
            currency: claim.currency().code().to_string(),
            product_review: claim.product_review.clone(),
            product_images: claim.product_images.iter().map(|i| i.label()).collect(),
            refund_amount: claim.refund_amount().amount(),
            refund_status: claim.refund_status().to_string(),
            refund_reason: claim.refund_reason().map(str::to_string),
            refund_notes: claim.refund_notes().map(str::to_string),
            created_at: claim.created_at(),
            finalized_at: claim.finalized_at(),
        }
    }
}
