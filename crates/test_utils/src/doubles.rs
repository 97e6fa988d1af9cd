//! In-memory doubles for the adjudication ports
//!
//! Each double counts its calls and records what it was given, so tests can
//! assert both on the pipeline outcome and on what reached each collaborator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};
use domain_claims::{
    AdjudicationPipeline, ClaimRecord, DefectAnalyzer, DefectOutcome, DefectResult,
    EstimatorError, Evidence, ImageRef, ProductContext, RefundDecision, RefundEstimator,
    SentimentAnalyzer, SentimentOutcome, SentimentResult,
};

use crate::fixtures::{DecisionFixtures, EvidenceFixtures};

/// What a double does when called
#[derive(Debug, Clone)]
pub enum Behavior<T> {
    Return(T),
    Panic,
}

/// Sentiment analyzer returning a fixed outcome
pub struct FakeSentimentAnalyzer {
    behavior: Behavior<SentimentOutcome>,
    barrier: Option<Arc<Barrier>>,
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

impl FakeSentimentAnalyzer {
    pub fn returning(result: SentimentResult) -> Self {
        Self::with_behavior(Behavior::Return(Ok(result)))
    }

    pub fn failing(error: domain_claims::ExtractorError) -> Self {
        Self::with_behavior(Behavior::Return(Err(error)))
    }

    pub fn panicking() -> Self {
        Self::with_behavior(Behavior::Panic)
    }

    fn with_behavior(behavior: Behavior<SentimentOutcome>) -> Self {
        Self {
            behavior,
            barrier: None,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Waits on `barrier` before answering
    pub fn rendezvous(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received_texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl Default for FakeSentimentAnalyzer {
    fn default() -> Self {
        Self::returning(EvidenceFixtures::negative_sentiment())
    }
}

impl DomainPort for FakeSentimentAnalyzer {}

#[async_trait]
impl SentimentAnalyzer for FakeSentimentAnalyzer {
    async fn analyze(&self, text: &str) -> SentimentOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(text.to_string());
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        match &self.behavior {
            Behavior::Return(outcome) => outcome.clone(),
            Behavior::Panic => panic!("sentiment double panicked"),
        }
    }
}

#[async_trait]
impl HealthCheckable for FakeSentimentAnalyzer {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new("fake_sentiment", AdapterHealth::Healthy, None)
    }
}

/// Defect analyzer returning a fixed outcome
pub struct FakeDefectAnalyzer {
    behavior: Behavior<DefectOutcome>,
    barrier: Option<Arc<Barrier>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(Vec<ImageRef>, ProductContext)>>,
}

impl FakeDefectAnalyzer {
    pub fn returning(result: DefectResult) -> Self {
        Self::with_behavior(Behavior::Return(Ok(result)))
    }

    pub fn failing(error: domain_claims::ExtractorError) -> Self {
        Self::with_behavior(Behavior::Return(Err(error)))
    }

    pub fn panicking() -> Self {
        Self::with_behavior(Behavior::Panic)
    }

    fn with_behavior(behavior: Behavior<DefectOutcome>) -> Self {
        Self {
            behavior,
            barrier: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Waits on `barrier` before answering
    pub fn rendezvous(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received_requests(&self) -> Vec<(Vec<ImageRef>, ProductContext)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for FakeDefectAnalyzer {
    fn default() -> Self {
        Self::returning(EvidenceFixtures::torn_seam())
    }
}

impl DomainPort for FakeDefectAnalyzer {}

#[async_trait]
impl DefectAnalyzer for FakeDefectAnalyzer {
    async fn analyze(&self, images: &[ImageRef], product: &ProductContext) -> DefectOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((images.to_vec(), product.clone()));
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        match &self.behavior {
            Behavior::Return(outcome) => outcome.clone(),
            Behavior::Panic => panic!("defect double panicked"),
        }
    }
}

#[async_trait]
impl HealthCheckable for FakeDefectAnalyzer {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new("fake_defect", AdapterHealth::Healthy, None)
    }
}

/// Refund estimator returning a fixed result
pub struct FakeRefundEstimator {
    behavior: Behavior<Result<RefundDecision, EstimatorError>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(ClaimRecord, Evidence)>>,
}

impl FakeRefundEstimator {
    pub fn returning(decision: RefundDecision) -> Self {
        Self::with_behavior(Behavior::Return(Ok(decision)))
    }

    pub fn failing(error: EstimatorError) -> Self {
        Self::with_behavior(Behavior::Return(Err(error)))
    }

    pub fn panicking() -> Self {
        Self::with_behavior(Behavior::Panic)
    }

    fn with_behavior(behavior: Behavior<Result<RefundDecision, EstimatorError>>) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Evidence passed on the most recent call
    pub fn last_evidence(&self) -> Option<Evidence> {
        self.seen.lock().unwrap().last().map(|(_, e)| e.clone())
    }

    /// Claim snapshot passed on the most recent call
    pub fn last_claim(&self) -> Option<ClaimRecord> {
        self.seen.lock().unwrap().last().map(|(c, _)| c.clone())
    }
}

impl Default for FakeRefundEstimator {
    fn default() -> Self {
        Self::returning(DecisionFixtures::partial_refund())
    }
}

impl DomainPort for FakeRefundEstimator {}

#[async_trait]
impl RefundEstimator for FakeRefundEstimator {
    async fn estimate(
        &self,
        claim: &ClaimRecord,
        evidence: &Evidence,
    ) -> Result<RefundDecision, EstimatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((claim.clone(), evidence.clone()));
        match &self.behavior {
            Behavior::Return(result) => result.clone(),
            Behavior::Panic => panic!("estimator double panicked"),
        }
    }
}

#[async_trait]
impl HealthCheckable for FakeRefundEstimator {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new("fake_estimator", AdapterHealth::Healthy, None)
    }
}

/// A pipeline wired to doubles, with handles kept for assertions
pub struct PipelineHarness {
    pub sentiment: Arc<FakeSentimentAnalyzer>,
    pub defect: Arc<FakeDefectAnalyzer>,
    pub estimator: Arc<FakeRefundEstimator>,
    pub pipeline: AdjudicationPipeline,
}

impl PipelineHarness {
    pub fn new(
        sentiment: FakeSentimentAnalyzer,
        defect: FakeDefectAnalyzer,
        estimator: FakeRefundEstimator,
    ) -> Self {
        let sentiment = Arc::new(sentiment);
        let defect = Arc::new(defect);
        let estimator = Arc::new(estimator);
        let pipeline = AdjudicationPipeline::new(
            sentiment.clone(),
            defect.clone(),
            estimator.clone(),
        );
        Self {
            sentiment,
            defect,
            estimator,
            pipeline,
        }
    }

    /// All collaborators succeed with the fixture outcomes
    pub fn happy_path() -> Self {
        Self::new(
            FakeSentimentAnalyzer::default(),
            FakeDefectAnalyzer::default(),
            FakeRefundEstimator::default(),
        )
    }

    /// Total number of collaborator calls
    pub fn total_calls(&self) -> usize {
        self.sentiment.call_count() + self.defect.call_count() + self.estimator.call_count()
    }
}
