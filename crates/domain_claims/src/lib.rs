//! Refund Claims Domain
//!
//! This crate implements adjudication of product-return refund claims: a
//! short-lived pipeline that checks the warranty window, gathers evidence
//! from independent extractors, and asks a refund estimator for a decision.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Initialized -> RejectedStale
//!             -> EvidenceGathered -> Reported
//!                                 -> EstimationFailed
//! ```
//!
//! The extractors and the estimator are ports ([`ports`]); adapters live in
//! other crates and are injected when the pipeline is constructed.

pub mod claim;
pub mod evidence;
pub mod estimation;
pub mod ports;
pub mod adjudication;
pub mod error;

pub use claim::{ClaimRecord, ClaimSubmission, ImageRef, RefundStatus};
pub use evidence::{
    DefectOutcome, DefectResult, Evidence, ExtractorError, ExtractorFailure, ExtractorKind,
    ProductContext, SentimentOutcome, SentimentResult,
};
pub use estimation::{EstimatorError, RefundDecision};
pub use ports::{DefectAnalyzer, RefundEstimator, SentimentAnalyzer};
pub use adjudication::{AdjudicationPipeline, PipelineState};
pub use error::ClaimError;
