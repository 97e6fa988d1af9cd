//! Claim submission and the claim record aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

use core_kernel::{parse_iso_date, ClaimId, Currency, Money};
use crate::error::ClaimError;
use crate::estimation::RefundDecision;

const STATUS_PENDING: &str = "Pending";
const STATUS_REJECTED: &str = "Rejected";
const STATUS_NOT_PROCESSED: &str = "Not Successfully Processed";

/// Reference to a product photo
///
/// Either a path readable by the defect analyzer or an inline blob. In JSON
/// a bare string is a path; an object carries `media_type` and `data_base64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Path(PathBuf),
    Inline {
        media_type: String,
        data_base64: String,
    },
}

impl ImageRef {
    /// Short human-readable label used in logs and error messages
    pub fn label(&self) -> String {
        match self {
            ImageRef::Path(path) => path.display().to_string(),
            ImageRef::Inline { media_type, .. } => format!("inline {}", media_type),
        }
    }
}

/// Raw claim as supplied by a caller
///
/// Every field is optional at this stage so that a missing field surfaces as
/// [`ClaimError::MalformedInput`] rather than a decoding failure. For the same
/// reason `product_cost` is kept as raw JSON until the record is opened, and
/// a `null` image list reads as empty. A `claim_id` supplied by the caller is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimSubmission {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub order_id: Option<String>,
    pub order_date: Option<String>,
    pub claim_date: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    /// A JSON number or a numeric string such as `"50.00"`
    pub product_cost: Option<Value>,
    pub currency: Option<Currency>,
    pub product_review: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub product_images: Vec<ImageRef>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ImageRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ImageRef>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Refund status of a claim
///
/// Approval labels are chosen by the refund estimator and kept verbatim.
/// Serialized as the plain label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RefundStatus {
    Pending,
    Rejected,
    NotSuccessfullyProcessed,
    Decided(String),
}

impl RefundStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RefundStatus::Pending => STATUS_PENDING,
            RefundStatus::Rejected => STATUS_REJECTED,
            RefundStatus::NotSuccessfullyProcessed => STATUS_NOT_PROCESSED,
            RefundStatus::Decided(label) => label,
        }
    }
}

impl From<String> for RefundStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            STATUS_PENDING => RefundStatus::Pending,
            STATUS_REJECTED => RefundStatus::Rejected,
            STATUS_NOT_PROCESSED => RefundStatus::NotSuccessfullyProcessed,
            _ => RefundStatus::Decided(label),
        }
    }
}

impl From<&str> for RefundStatus {
    fn from(label: &str) -> Self {
        RefundStatus::from(label.to_string())
    }
}

impl From<RefundStatus> for String {
    fn from(status: RefundStatus) -> Self {
        match status {
            RefundStatus::Decided(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A refund claim moving through adjudication
///
/// The identifier and the refund outcome are private: the identifier is
/// assigned when the record is opened and the outcome is written once by
/// [`ClaimRecord::finalize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimRecord {
    claim_id: ClaimId,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub order_id: String,
    pub order_date: NaiveDate,
    pub claim_date: NaiveDate,
    pub product_id: String,
    pub product_name: String,
    pub product_description: String,
    pub product_cost: Money,
    pub product_review: String,
    pub product_images: Vec<ImageRef>,
    refund_amount: Money,
    refund_status: RefundStatus,
    refund_reason: Option<String>,
    refund_notes: Option<String>,
    created_at: DateTime<Utc>,
    finalized_at: Option<DateTime<Utc>>,
}

impl ClaimRecord {
    /// Validates a submission and opens a pending claim with a fresh identifier
    pub fn open(submission: ClaimSubmission) -> Result<Self, ClaimError> {
        let customer_id = required_text("customer_id", submission.customer_id)?;
        let order_id = required_text("order_id", submission.order_id)?;
        let product_id = required_text("product_id", submission.product_id)?;
        let order_date = required_date("order_date", submission.order_date)?;
        let claim_date = required_date("claim_date", submission.claim_date)?;
        let product_name = required_text("product_name", submission.product_name)?;
        let product_description =
            required_text("product_description", submission.product_description)?;
        let product_review = required_text("product_review", submission.product_review)?;

        let currency = submission.currency.unwrap_or_default();
        let product_cost = required_cost(submission.product_cost, currency)?;

        Ok(Self {
            claim_id: ClaimId::new_v7(),
            customer_id,
            customer_name: submission.customer_name.filter(|n| !n.trim().is_empty()),
            order_id,
            order_date,
            claim_date,
            product_id,
            product_name,
            product_description,
            product_cost,
            product_review,
            product_images: submission.product_images,
            refund_amount: Money::zero(currency),
            refund_status: RefundStatus::Pending,
            refund_reason: None,
            refund_notes: None,
            created_at: Utc::now(),
            finalized_at: None,
        })
    }

    pub fn claim_id(&self) -> ClaimId {
        self.claim_id
    }

    /// Currency shared by the product cost and the refund amount
    pub fn currency(&self) -> Currency {
        self.product_cost.currency()
    }

    pub fn refund_amount(&self) -> Money {
        self.refund_amount
    }

    pub fn refund_status(&self) -> &RefundStatus {
        &self.refund_status
    }

    pub fn refund_reason(&self) -> Option<&str> {
        self.refund_reason.as_deref()
    }

    pub fn refund_notes(&self) -> Option<&str> {
        self.refund_notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn finalized_at(&self) -> Option<DateTime<Utc>> {
        self.finalized_at
    }

    /// Returns true once a refund outcome has been written
    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }

    /// Writes the refund outcome
    ///
    /// Succeeds at most once per record. A rejected call leaves the record
    /// untouched.
    pub fn finalize(&mut self, decision: RefundDecision) -> Result<(), ClaimError> {
        if self.is_finalized() {
            return Err(ClaimError::AlreadyFinalized {
                claim_id: self.claim_id.to_string(),
            });
        }
        if decision.refund_amount.currency() != self.currency() {
            return Err(ClaimError::CurrencyMismatch {
                claim: self.currency().to_string(),
                refund: decision.refund_amount.currency().to_string(),
            });
        }

        self.refund_amount = decision.refund_amount;
        self.refund_status = decision.refund_status;
        self.refund_reason = Some(decision.refund_reason);
        self.refund_notes = decision.refund_notes;
        self.finalized_at = Some(Utc::now());
        Ok(())
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String, ClaimError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(ClaimError::malformed(field, "must not be blank")),
        None => Err(ClaimError::malformed(field, "field is required")),
    }
}

fn required_date(field: &str, value: Option<String>) -> Result<NaiveDate, ClaimError> {
    let text = value.ok_or_else(|| ClaimError::malformed(field, "field is required"))?;
    parse_iso_date(field, &text).map_err(|e| ClaimError::malformed(field, e.to_string()))
}

fn required_cost(value: Option<Value>, currency: Currency) -> Result<Money, ClaimError> {
    const FIELD: &str = "product_cost";
    let text = match value {
        None | Some(Value::Null) => return Err(ClaimError::malformed(FIELD, "field is required")),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s,
        Some(_) => return Err(ClaimError::malformed(FIELD, "must be a number")),
    };
    Money::parse_amount(&text, currency).map_err(|e| ClaimError::malformed(FIELD, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn submission() -> ClaimSubmission {
        ClaimSubmission {
            customer_id: Some("12345".into()),
            customer_name: None,
            order_id: Some("67890".into()),
            order_date: Some("2022-01-01".into()),
            claim_date: Some("2022-03-31".into()),
            product_id: Some("P123".into()),
            product_name: Some("Panda Stuffed Animal".into()),
            product_description: Some("A cute stuffed animal in the shape of a Panda".into()),
            product_cost: Some(json!(50.0)),
            currency: None,
            product_review: Some("Stitches are broken.".into()),
            product_images: vec![],
        }
    }

    #[test]
    fn test_open_starts_pending() {
        let claim = ClaimRecord::open(submission()).unwrap();
        assert_eq!(claim.refund_status(), &RefundStatus::Pending);
        assert!(claim.refund_amount().is_zero());
        assert!(claim.refund_reason().is_none());
        assert!(!claim.is_finalized());
        assert_eq!(claim.currency(), Currency::USD);
    }

    #[test]
    fn test_open_rejects_blank_identifier() {
        let mut s = submission();
        s.order_id = Some("   ".into());
        let err = ClaimRecord::open(s).unwrap_err();
        assert_eq!(err, ClaimError::malformed("order_id", "must not be blank"));
    }

    #[test]
    fn test_open_rejects_negative_cost() {
        let mut s = submission();
        s.product_cost = Some(json!(-1));
        let err = ClaimRecord::open(s).unwrap_err();
        assert!(matches!(err, ClaimError::MalformedInput { ref field, .. } if field == "product_cost"));
    }

    #[test]
    fn test_cost_accepts_numbers_and_numeric_strings() {
        for cost in [json!(50), json!(50.0), json!("50.00")] {
            let mut s = submission();
            s.product_cost = Some(cost);
            let claim = ClaimRecord::open(s).unwrap();
            assert_eq!(claim.product_cost.amount(), Decimal::new(50, 0));
        }
    }

    #[test]
    fn test_cost_rejects_non_numbers() {
        for cost in [json!("fifty"), json!(true), json!([50]), json!({"amount": 50})] {
            let mut s = submission();
            s.product_cost = Some(cost);
            let err = ClaimRecord::open(s).unwrap_err();
            assert!(matches!(err, ClaimError::MalformedInput { ref field, .. } if field == "product_cost"));
        }
    }

    #[test]
    fn test_null_cost_is_missing() {
        let mut s = submission();
        s.product_cost = Some(Value::Null);
        let err = ClaimRecord::open(s).unwrap_err();
        assert_eq!(err, ClaimError::malformed("product_cost", "field is required"));
    }

    #[test]
    fn test_null_images_decode_as_empty() {
        let s: ClaimSubmission =
            serde_json::from_value(json!({"product_images": null, "product_cost": "fifty"})).unwrap();
        assert!(s.product_images.is_empty());
        assert_eq!(s.product_cost, Some(json!("fifty")));
    }

    #[test]
    fn test_status_labels_roundtrip() {
        assert_eq!(RefundStatus::from("Rejected"), RefundStatus::Rejected);
        assert_eq!(
            RefundStatus::from("Not Successfully Processed"),
            RefundStatus::NotSuccessfullyProcessed
        );
        assert_eq!(
            RefundStatus::from("Partially Approved"),
            RefundStatus::Decided("Partially Approved".into())
        );
        assert_eq!(String::from(RefundStatus::Pending), "Pending");
    }

    #[test]
    fn test_finalize_is_write_once() {
        let mut claim = ClaimRecord::open(submission()).unwrap();
        claim.finalize(RefundDecision::stale_rejection(90, Currency::USD)).unwrap();
        let snapshot = claim.clone();

        let second = claim.finalize(RefundDecision::processing_failure(Currency::USD));
        assert!(matches!(second, Err(ClaimError::AlreadyFinalized { .. })));
        assert_eq!(claim, snapshot);
    }
}
