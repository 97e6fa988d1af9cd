//! Claim adjudication pipeline
//!
//! The pipeline is a small state machine. Each non-terminal
//! [`PipelineState`] has exactly one transition; the decisions inside those
//! transitions (eligibility, applying an estimate) are plain functions that
//! take no collaborators.
//!
//! ```text
//! Initialized ──stale──────────────────────────────▶ RejectedStale
//!      │
//!      └─eligible─▶ EvidenceGathered ──decision────▶ Reported
//!                                    └──error──────▶ EstimationFailed
//! ```

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use core_kernel::WarrantyWindow;
use crate::claim::{ClaimRecord, ClaimSubmission};
use crate::error::ClaimError;
use crate::estimation::{EstimatorError, RefundDecision};
use crate::evidence::{Evidence, ExtractorError, ExtractorFailure, ExtractorKind, ProductContext};
use crate::ports::{DefectAnalyzer, RefundEstimator, SentimentAnalyzer};

/// Position of a claim in the adjudication pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// Record opened, eligibility not yet decided
    Initialized(ClaimRecord),
    /// Filed outside the warranty window
    RejectedStale(ClaimRecord),
    /// Both extractors have returned
    EvidenceGathered {
        claim: ClaimRecord,
        evidence: Evidence,
    },
    /// The estimator's decision was applied
    Reported(ClaimRecord),
    /// The estimator failed; the fallback outcome was applied
    EstimationFailed(ClaimRecord),
}

impl PipelineState {
    /// Opens a claim record from a submission
    ///
    /// This is the only step that can fail.
    pub fn initialize(submission: ClaimSubmission) -> Result<Self, ClaimError> {
        ClaimRecord::open(submission).map(PipelineState::Initialized)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Initialized(_) => "initialized",
            PipelineState::RejectedStale(_) => "rejected_stale",
            PipelineState::EvidenceGathered { .. } => "evidence_gathered",
            PipelineState::Reported(_) => "reported",
            PipelineState::EstimationFailed(_) => "estimation_failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::RejectedStale(_)
                | PipelineState::Reported(_)
                | PipelineState::EstimationFailed(_)
        )
    }

    pub fn claim(&self) -> &ClaimRecord {
        match self {
            PipelineState::Initialized(claim)
            | PipelineState::RejectedStale(claim)
            | PipelineState::Reported(claim)
            | PipelineState::EstimationFailed(claim) => claim,
            PipelineState::EvidenceGathered { claim, .. } => claim,
        }
    }

    pub fn into_claim(self) -> ClaimRecord {
        match self {
            PipelineState::Initialized(claim)
            | PipelineState::RejectedStale(claim)
            | PipelineState::Reported(claim)
            | PipelineState::EstimationFailed(claim) => claim,
            PipelineState::EvidenceGathered { claim, .. } => claim,
        }
    }
}

/// Returns true if the claim was filed inside the warranty window
pub fn is_eligible(claim: &ClaimRecord, window: WarrantyWindow) -> bool {
    window.contains(claim.order_date, claim.claim_date)
}

/// Finalizes a stale claim as rejected
pub fn reject_stale(mut claim: ClaimRecord, window: WarrantyWindow) -> PipelineState {
    let decision = RefundDecision::stale_rejection(window.days(), claim.currency());
    if let Err(e) = claim.finalize(decision) {
        warn!(claim_id = %claim.claim_id(), error = %e, "Stale rejection not recorded");
    }
    info!(
        claim_id = %claim.claim_id(),
        order_date = %claim.order_date,
        claim_date = %claim.claim_date,
        window_days = window.days(),
        "Claim rejected: outside warranty window"
    );
    PipelineState::RejectedStale(claim)
}

/// Applies the estimator's answer to a claim
///
/// A decision that cannot be written (for example in the wrong currency) is
/// treated like an estimator error.
pub fn apply_estimate(
    mut claim: ClaimRecord,
    result: Result<RefundDecision, EstimatorError>,
) -> PipelineState {
    let decision = match result {
        Ok(decision) => decision,
        Err(e) => {
            warn!(claim_id = %claim.claim_id(), error = %e, "Refund estimation failed");
            return fail_estimation(claim);
        }
    };

    match claim.finalize(decision) {
        Ok(()) => {
            info!(
                claim_id = %claim.claim_id(),
                refund_status = %claim.refund_status(),
                refund_amount = %claim.refund_amount(),
                "Claim adjudicated"
            );
            PipelineState::Reported(claim)
        }
        Err(e) => {
            warn!(claim_id = %claim.claim_id(), error = %e, "Refund decision rejected");
            fail_estimation(claim)
        }
    }
}

fn fail_estimation(mut claim: ClaimRecord) -> PipelineState {
    let fallback = RefundDecision::processing_failure(claim.currency());
    if let Err(e) = claim.finalize(fallback) {
        warn!(claim_id = %claim.claim_id(), error = %e, "Fallback outcome not recorded");
    }
    PipelineState::EstimationFailed(claim)
}

/// Orchestrates adjudication of refund claims
///
/// Collaborators are injected at construction. The pipeline holds no
/// per-claim state and can be shared across concurrent requests.
#[derive(Clone)]
pub struct AdjudicationPipeline {
    sentiment: Arc<dyn SentimentAnalyzer>,
    defect: Arc<dyn DefectAnalyzer>,
    estimator: Arc<dyn RefundEstimator>,
    window: WarrantyWindow,
}

impl AdjudicationPipeline {
    /// Creates a pipeline using the standard 90-day warranty window
    pub fn new(
        sentiment: Arc<dyn SentimentAnalyzer>,
        defect: Arc<dyn DefectAnalyzer>,
        estimator: Arc<dyn RefundEstimator>,
    ) -> Self {
        Self {
            sentiment,
            defect,
            estimator,
            window: WarrantyWindow::STANDARD,
        }
    }

    /// Overrides the warranty window
    pub fn with_window(mut self, window: WarrantyWindow) -> Self {
        self.window = window;
        self
    }

    pub fn window(&self) -> WarrantyWindow {
        self.window
    }

    /// Adjudicates a claim submission
    ///
    /// Returns the finalized record for every terminal outcome. The only
    /// error is [`ClaimError::MalformedInput`] from opening the record.
    #[instrument(skip_all, fields(claim_id = tracing::field::Empty))]
    pub async fn adjudicate(&self, submission: ClaimSubmission) -> Result<ClaimRecord, ClaimError> {
        let mut state = PipelineState::initialize(submission).map_err(|e| {
            warn!(error = %e, "Claim submission rejected");
            e
        })?;
        tracing::Span::current().record("claim_id", tracing::field::display(state.claim().claim_id()));

        while !state.is_terminal() {
            state = self.advance(state).await;
            debug!(state = state.name(), "Pipeline transition");
        }

        Ok(state.into_claim())
    }

    /// Performs the single transition out of `state`
    ///
    /// Terminal states are returned unchanged.
    pub async fn advance(&self, state: PipelineState) -> PipelineState {
        match state {
            PipelineState::Initialized(claim) => {
                if !is_eligible(&claim, self.window) {
                    return reject_stale(claim, self.window);
                }
                let evidence = self.gather_evidence(&claim).await;
                PipelineState::EvidenceGathered { claim, evidence }
            }
            PipelineState::EvidenceGathered { claim, evidence } => {
                let result = self.estimate(&claim, evidence).await;
                apply_estimate(claim, result)
            }
            terminal => terminal,
        }
    }

    /// Runs both extractors concurrently and waits for both
    async fn gather_evidence(&self, claim: &ClaimRecord) -> Evidence {
        let sentiment_task = {
            let analyzer = Arc::clone(&self.sentiment);
            let review = claim.product_review.clone();
            tokio::spawn(async move { analyzer.analyze(&review).await })
        };
        let defect_task = {
            let analyzer = Arc::clone(&self.defect);
            let images = claim.product_images.clone();
            let product = ProductContext::from(claim);
            tokio::spawn(async move { analyzer.analyze(&images, &product).await })
        };

        let (sentiment, defect) = tokio::join!(sentiment_task, defect_task);
        let evidence = Evidence {
            sentiment: sentiment.unwrap_or_else(|e| {
                Err(ExtractorError::new(ExtractorKind::Sentiment, ExtractorFailure::Aborted, e.to_string()))
            }),
            defect: defect.unwrap_or_else(|e| {
                Err(ExtractorError::new(ExtractorKind::Defect, ExtractorFailure::Aborted, e.to_string()))
            }),
        };

        if let Err(e) = &evidence.sentiment {
            warn!(claim_id = %claim.claim_id(), error = %e, "Sentiment evidence missing");
        }
        if let Err(e) = &evidence.defect {
            warn!(claim_id = %claim.claim_id(), error = %e, "Defect evidence missing");
        }
        evidence
    }

    async fn estimate(
        &self,
        claim: &ClaimRecord,
        evidence: Evidence,
    ) -> Result<RefundDecision, EstimatorError> {
        let estimator = Arc::clone(&self.estimator);
        let snapshot = claim.clone();
        tokio::spawn(async move { estimator.estimate(&snapshot, &evidence).await })
            .await
            .unwrap_or_else(|e| Err(EstimatorError::Aborted(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, Money};
    use rust_decimal::Decimal;
    use crate::claim::RefundStatus;

    fn claim(order: &str, filed: &str) -> ClaimRecord {
        ClaimRecord::open(ClaimSubmission {
            customer_id: Some("c-1".into()),
            order_id: Some("o-1".into()),
            order_date: Some(order.into()),
            claim_date: Some(filed.into()),
            product_id: Some("p-1".into()),
            product_name: Some("Kettle".into()),
            product_description: Some("Electric kettle".into()),
            product_cost: Some(serde_json::json!("40.00")),
            product_review: Some("Leaks from the base.".into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_eligibility_boundary() {
        let window = WarrantyWindow::STANDARD;
        assert!(is_eligible(&claim("2022-01-01", "2022-04-01"), window));
        assert!(!is_eligible(&claim("2022-01-01", "2022-04-02"), window));
    }

    #[test]
    fn test_reject_stale_is_terminal() {
        let state = reject_stale(claim("2022-01-01", "2022-05-01"), WarrantyWindow::STANDARD);
        assert_eq!(state.name(), "rejected_stale");
        assert!(state.is_terminal());
        assert_eq!(state.claim().refund_status(), &RefundStatus::Rejected);
    }

    #[test]
    fn test_apply_estimate_success() {
        let decision = RefundDecision {
            refund_amount: Money::new(Decimal::new(1000, 2), Currency::USD),
            refund_status: RefundStatus::from("Approved"),
            refund_reason: "Leak confirmed".into(),
            refund_notes: None,
        };
        let state = apply_estimate(claim("2022-01-01", "2022-01-10"), Ok(decision.clone()));
        assert!(matches!(state, PipelineState::Reported(_)));
        assert_eq!(state.claim().refund_amount(), decision.refund_amount);
    }

    #[test]
    fn test_apply_estimate_currency_mismatch_fails() {
        let decision = RefundDecision {
            refund_amount: Money::new(Decimal::new(1000, 2), Currency::EUR),
            refund_status: RefundStatus::from("Approved"),
            refund_reason: "Leak confirmed".into(),
            refund_notes: None,
        };
        let state = apply_estimate(claim("2022-01-01", "2022-01-10"), Ok(decision));
        assert_eq!(state.name(), "estimation_failed");
        assert!(state.claim().refund_amount().is_zero());
        assert_eq!(state.claim().refund_amount().currency(), Currency::USD);
    }

    #[test]
    fn test_apply_estimate_error() {
        let state = apply_estimate(
            claim("2022-01-01", "2022-01-10"),
            Err(EstimatorError::Backend("500".into())),
        );
        assert_eq!(state.claim().refund_status(), &RefundStatus::NotSuccessfullyProcessed);
        assert_eq!(
            state.claim().refund_reason(),
            Some("Error processing refund request. Please try again later.")
        );
        assert!(state.claim().refund_notes().is_none());
    }
}
