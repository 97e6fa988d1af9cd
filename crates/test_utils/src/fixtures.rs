//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for claims, evidence and decisions.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_claims::{
    DefectResult, ExtractorError, ExtractorFailure, ExtractorKind, ImageRef, RefundDecision,
    RefundStatus, SentimentResult,
};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Price of the sample panda
    pub fn usd_50() -> Money {
        Money::new(dec!(50.00), Currency::USD)
    }

    pub fn usd_25() -> Money {
        Money::new(dec!(25.00), Currency::USD)
    }

    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_25() -> Money {
        Money::new(dec!(25.00), Currency::EUR)
    }
}

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// Order date of the sample claim (Jan 1, 2022)
    pub fn order_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
    }

    /// Last day inside the 90-day window (Apr 1, 2022)
    pub fn last_eligible_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 4, 1).unwrap()
    }

    /// First day outside the 90-day window (Apr 2, 2022)
    pub fn first_stale_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 4, 2).unwrap()
    }

    pub fn iso(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

/// The panda stuffed animal claim used throughout the test suite
pub struct ClaimFixtures;

impl ClaimFixtures {
    pub const CUSTOMER_ID: &'static str = "12345";
    pub const ORDER_ID: &'static str = "67890";
    pub const PRODUCT_ID: &'static str = "P123";
    pub const PRODUCT_NAME: &'static str = "Panda Stuffed Animal";
    pub const PRODUCT_DESCRIPTION: &'static str = "A cute stuffed animal in the shape of a Panda";
    pub const ORDER_DATE: &'static str = "2022-01-01";
    pub const CLAIM_DATE: &'static str = "2022-03-31";
    pub const REVIEW: &'static str =
        "The panda arrived with a torn seam and stuffing coming out of one arm. Very disappointed.";

    pub fn images() -> Vec<ImageRef> {
        vec![
            ImageRef::Path("images/panda_front.jpg".into()),
            ImageRef::Path("images/panda_arm.jpg".into()),
            ImageRef::Path("images/panda_seam.jpg".into()),
        ]
    }

    /// A JSON body equivalent to the fixture submission
    pub fn submission_json() -> serde_json::Value {
        serde_json::json!({
            "customer_id": Self::CUSTOMER_ID,
            "order_id": Self::ORDER_ID,
            "order_date": Self::ORDER_DATE,
            "claim_date": Self::CLAIM_DATE,
            "product_id": Self::PRODUCT_ID,
            "product_name": Self::PRODUCT_NAME,
            "product_description": Self::PRODUCT_DESCRIPTION,
            "product_cost": 50.0,
            "product_review": Self::REVIEW,
            "product_images": [
                "images/panda_front.jpg",
                "images/panda_arm.jpg",
                "images/panda_seam.jpg"
            ]
        })
    }
}

/// Fixture for extractor outcomes
pub struct EvidenceFixtures;

impl EvidenceFixtures {
    pub fn negative_sentiment() -> SentimentResult {
        SentimentResult {
            score: 0.92,
            label: "negative".to_string(),
            detail: "negative 0.92, neutral 0.06, positive 0.02".to_string(),
        }
    }

    pub fn torn_seam() -> DefectResult {
        DefectResult {
            detected_defects: vec!["torn seam".to_string(), "exposed stuffing".to_string()],
            defect_score: 0.6,
        }
    }

    pub fn sentiment_timeout() -> ExtractorError {
        ExtractorError::new(
            ExtractorKind::Sentiment,
            ExtractorFailure::Unavailable,
            "request timed out",
        )
    }

    pub fn vision_unavailable() -> ExtractorError {
        ExtractorError::new(
            ExtractorKind::Defect,
            ExtractorFailure::Unavailable,
            "vision service unavailable",
        )
    }
}

/// Fixture for estimator decisions
pub struct DecisionFixtures;

impl DecisionFixtures {
    /// Half refund of the sample panda
    pub fn partial_refund() -> RefundDecision {
        RefundDecision {
            refund_amount: MoneyFixtures::usd_25(),
            refund_status: RefundStatus::from("Partially Approved"),
            refund_reason: "Seam damage confirmed by photos and review".to_string(),
            refund_notes: Some("Defect score 0.6 with strongly negative review".to_string()),
        }
    }

    /// Same refund expressed in the wrong currency
    pub fn eur_refund() -> RefundDecision {
        RefundDecision {
            refund_amount: MoneyFixtures::eur_25(),
            ..Self::partial_refund()
        }
    }
}
