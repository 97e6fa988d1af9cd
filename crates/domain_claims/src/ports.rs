//! Claims Domain Ports
//!
//! The adjudication pipeline depends on three external capabilities. Each is
//! a trait so the pipeline can be built against HTTP adapters in production
//! and against in-memory doubles in tests.
//!
//! ```rust,ignore
//! let pipeline = AdjudicationPipeline::new(
//!     Arc::new(HttpSentimentAnalyzer::new(&config)?),
//!     Arc::new(VisionDefectAnalyzer::new(&config)?),
//!     Arc::new(LlmRefundEstimator::new(&config)?),
//! );
//! ```
//!
//! No retry policy is applied by the pipeline; adapters own their timeouts.

use async_trait::async_trait;

use core_kernel::DomainPort;
use crate::claim::{ClaimRecord, ImageRef};
use crate::estimation::{EstimatorError, RefundDecision};
use crate::evidence::{DefectOutcome, Evidence, ProductContext, SentimentOutcome};

/// Text sentiment extractor
#[async_trait]
pub trait SentimentAnalyzer: DomainPort {
    /// Assesses the sentiment of a product review
    ///
    /// Failures are returned as an error marker, never raised.
    async fn analyze(&self, text: &str) -> SentimentOutcome;
}

/// Visual defect extractor
#[async_trait]
pub trait DefectAnalyzer: DomainPort {
    /// Detects defects in product photos
    ///
    /// Must accept an empty image list.
    async fn analyze(&self, images: &[ImageRef], product: &ProductContext) -> DefectOutcome;
}

/// Fuses claim details and evidence into a refund decision
#[async_trait]
pub trait RefundEstimator: DomainPort {
    async fn estimate(
        &self,
        claim: &ClaimRecord,
        evidence: &Evidence,
    ) -> Result<RefundDecision, EstimatorError>;
}
