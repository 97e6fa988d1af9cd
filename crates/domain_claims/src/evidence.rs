//! Evidence produced by the extractors
//!
//! Each extractor call yields its own `Result`. A failed extraction is not an
//! error of the pipeline: the [`ExtractorError`] travels inside [`Evidence`]
//! to the refund estimator, which decides how to weigh the missing signal.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use core_kernel::PortError;
use crate::claim::ClaimRecord;

/// Which extractor produced a piece of evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    Sentiment,
    Defect,
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractorKind::Sentiment => f.write_str("sentiment"),
            ExtractorKind::Defect => f.write_str("defect"),
        }
    }
}

/// Classification of an extractor failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorFailure {
    /// The backend rejected the request or failed permanently
    Backend,
    /// The backend was unreachable, timed out, or throttled us
    Unavailable,
    /// The backend answered with a payload of the wrong shape or range
    InvalidResponse,
    /// A product image could not be read or encoded
    ImageEncoding,
    /// The extractor task terminated without producing a result
    Aborted,
}

impl fmt::Display for ExtractorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExtractorFailure::Backend => "backend error",
            ExtractorFailure::Unavailable => "backend unavailable",
            ExtractorFailure::InvalidResponse => "invalid response",
            ExtractorFailure::ImageEncoding => "image encoding",
            ExtractorFailure::Aborted => "aborted",
        };
        f.write_str(label)
    }
}

/// Error marker carried in place of an extractor result
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{extractor} extractor failed ({kind}): {message}")]
pub struct ExtractorError {
    pub extractor: ExtractorKind,
    pub kind: ExtractorFailure,
    pub message: String,
}

impl ExtractorError {
    pub fn new(extractor: ExtractorKind, kind: ExtractorFailure, message: impl Into<String>) -> Self {
        Self {
            extractor,
            kind,
            message: message.into(),
        }
    }

    /// Classifies a transport failure reported by an adapter
    pub fn from_port(extractor: ExtractorKind, error: &PortError) -> Self {
        let kind = if error.is_transient() {
            ExtractorFailure::Unavailable
        } else if error.is_malformed_response() {
            ExtractorFailure::InvalidResponse
        } else {
            ExtractorFailure::Backend
        };
        Self::new(extractor, kind, error.to_string())
    }
}

/// Sentiment assessment of the customer's review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Confidence of the winning label, 0.0 to 1.0
    pub score: f64,
    pub label: String,
    pub detail: String,
}

/// Visual defect assessment of the product photos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectResult {
    pub detected_defects: Vec<String>,
    /// 0.0 is perfect condition, 1.0 severely damaged
    pub defect_score: f64,
}

impl DefectResult {
    /// Result used when there is no visual evidence to assess
    pub fn no_visual_evidence() -> Self {
        Self {
            detected_defects: Vec::new(),
            defect_score: 0.0,
        }
    }
}

pub type SentimentOutcome = Result<SentimentResult, ExtractorError>;
pub type DefectOutcome = Result<DefectResult, ExtractorError>;

/// Product details given to the defect analyzer alongside the photos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductContext {
    pub name: String,
    pub description: String,
}

impl From<&ClaimRecord> for ProductContext {
    fn from(claim: &ClaimRecord) -> Self {
        Self {
            name: claim.product_name.clone(),
            description: claim.product_description.clone(),
        }
    }
}

/// Both extractor outcomes for one claim, handed unchanged to the estimator
#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    pub sentiment: SentimentOutcome,
    pub defect: DefectOutcome,
}

impl Evidence {
    /// Returns true if at least one extractor failed
    pub fn is_partial(&self) -> bool {
        self.sentiment.is_err() || self.defect.is_err()
    }
}
