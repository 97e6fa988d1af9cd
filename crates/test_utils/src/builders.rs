//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::Currency;
use domain_claims::{ClaimSubmission, ImageRef};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::fixtures::{ClaimFixtures, DateFixtures};

/// Builder for claim submissions, defaulting to the panda fixture
#[derive(Debug, Clone)]
pub struct ClaimSubmissionBuilder {
    submission: ClaimSubmission,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            submission: ClaimSubmission {
                customer_id: Some(ClaimFixtures::CUSTOMER_ID.to_string()),
                customer_name: None,
                order_id: Some(ClaimFixtures::ORDER_ID.to_string()),
                order_date: Some(ClaimFixtures::ORDER_DATE.to_string()),
                claim_date: Some(ClaimFixtures::CLAIM_DATE.to_string()),
                product_id: Some(ClaimFixtures::PRODUCT_ID.to_string()),
                product_name: Some(ClaimFixtures::PRODUCT_NAME.to_string()),
                product_description: Some(ClaimFixtures::PRODUCT_DESCRIPTION.to_string()),
                product_cost: Some(json!("50.00")),
                currency: None,
                product_review: Some(ClaimFixtures::REVIEW.to_string()),
                product_images: ClaimFixtures::images(),
            },
        }
    }

    pub fn with_customer_id(mut self, id: impl Into<String>) -> Self {
        self.submission.customer_id = Some(id.into());
        self
    }

    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.submission.customer_name = Some(name.into());
        self
    }

    pub fn with_order_id(mut self, id: impl Into<String>) -> Self {
        self.submission.order_id = Some(id.into());
        self
    }

    /// Sets the order date from raw text, which may be malformed
    pub fn with_order_date(mut self, date: impl Into<String>) -> Self {
        self.submission.order_date = Some(date.into());
        self
    }

    /// Sets the claim date from raw text, which may be malformed
    pub fn with_claim_date(mut self, date: impl Into<String>) -> Self {
        self.submission.claim_date = Some(date.into());
        self
    }

    /// Sets both dates from calendar values
    pub fn with_dates(self, order: NaiveDate, claim: NaiveDate) -> Self {
        self.with_order_date(DateFixtures::iso(order))
            .with_claim_date(DateFixtures::iso(claim))
    }

    /// Files the claim `days` days after the order date
    pub fn filed_days_after_order(self, days: u64) -> Self {
        let order = DateFixtures::order_date();
        let claim = order + chrono::Days::new(days);
        self.with_dates(order, claim)
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.submission.product_name = Some(name.into());
        self
    }

    pub fn with_product_cost(mut self, cost: Decimal) -> Self {
        self.submission.product_cost = Some(Value::String(cost.to_string()));
        self
    }

    /// Sets the cost to arbitrary JSON, for malformed-input cases
    pub fn with_raw_product_cost(mut self, cost: Value) -> Self {
        self.submission.product_cost = Some(cost);
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.submission.currency = Some(currency);
        self
    }

    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.submission.product_review = Some(review.into());
        self
    }

    pub fn with_images(mut self, images: Vec<ImageRef>) -> Self {
        self.submission.product_images = images;
        self
    }

    pub fn without_images(self) -> Self {
        self.with_images(Vec::new())
    }

    /// Removes a field by name so the submission is incomplete
    pub fn without_field(mut self, field: &str) -> Self {
        let s = &mut self.submission;
        match field {
            "customer_id" => s.customer_id = None,
            "order_id" => s.order_id = None,
            "order_date" => s.order_date = None,
            "claim_date" => s.claim_date = None,
            "product_id" => s.product_id = None,
            "product_name" => s.product_name = None,
            "product_description" => s.product_description = None,
            "product_cost" => s.product_cost = None,
            "product_review" => s.product_review = None,
            other => panic!("unknown claim field: {}", other),
        }
        self
    }

    pub fn build(self) -> ClaimSubmission {
        self.submission
    }
}
