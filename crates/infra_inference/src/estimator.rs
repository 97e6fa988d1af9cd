//! Chat model refund estimator adapter

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, Currency, DomainPort, HealthCheckResult, HealthCheckable, Money,
};
use domain_claims::{
    ClaimRecord, EstimatorError, Evidence, RefundDecision, RefundEstimator, RefundStatus,
};

use crate::client::{ChatClient, ChatMessage, ChatRequest, ContentPart, ResponseFormat};
use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::prompts::{estimation_prompt, refund_schema, REFUND_ESTIMATION_SYSTEM_PROMPT};

const ADAPTER_ID: &str = "refund-estimator";

/// Raw decision as returned by the model
#[derive(Debug, Clone, Deserialize)]
pub struct RefundReply {
    pub refund_amount: String,
    pub refund_status: String,
    pub refund_reason: String,
    pub refund_notes: Option<String>,
}

/// Turns a raw reply into a decision in the claim's currency
pub fn parse_decision(reply: RefundReply, currency: Currency) -> Result<RefundDecision, EstimatorError> {
    let refund_amount = Money::parse_amount(&reply.refund_amount, currency).map_err(|e| {
        EstimatorError::InvalidDecision(format!("refund_amount '{}': {}", reply.refund_amount, e))
    })?;

    let status = reply.refund_status.trim();
    if status.is_empty() {
        return Err(EstimatorError::InvalidDecision("refund_status is empty".to_string()));
    }
    let reason = reply.refund_reason.trim();
    if reason.is_empty() {
        return Err(EstimatorError::InvalidDecision("refund_reason is empty".to_string()));
    }

    Ok(RefundDecision {
        refund_amount,
        refund_status: RefundStatus::from(status),
        refund_reason: reason.to_string(),
        refund_notes: reply
            .refund_notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    })
}

/// Refund estimator backed by a chat model with structured output
#[derive(Debug, Clone)]
pub struct LlmRefundEstimator {
    client: ChatClient,
    model: String,
}

impl LlmRefundEstimator {
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        Ok(Self {
            client: ChatClient::new("refund-estimation", config)?,
            model: config.refund_estimation_model.clone(),
        })
    }

    pub fn build_request(&self, claim: &ClaimRecord, evidence: &Evidence) -> ChatRequest {
        self.client.request(
            &self.model,
            vec![
                ChatMessage::system(REFUND_ESTIMATION_SYSTEM_PROMPT),
                ChatMessage::user(vec![ContentPart::text(estimation_prompt(claim, evidence))]),
            ],
            ResponseFormat::strict_schema("refund_estimation", refund_schema()),
        )
    }
}

impl DomainPort for LlmRefundEstimator {}

#[async_trait]
impl RefundEstimator for LlmRefundEstimator {
    #[instrument(skip_all, fields(claim_id = %claim.claim_id(), partial = evidence.is_partial()))]
    async fn estimate(
        &self,
        claim: &ClaimRecord,
        evidence: &Evidence,
    ) -> Result<RefundDecision, EstimatorError> {
        let request = self.build_request(claim, evidence);
        let reply: RefundReply = self.client.complete_json(&request).await?;
        let decision = parse_decision(reply, claim.currency())?;
        debug!(
            refund_status = %decision.refund_status,
            refund_amount = %decision.refund_amount,
            "Refund estimated"
        );
        Ok(decision)
    }
}

#[async_trait]
impl HealthCheckable for LlmRefundEstimator {
    async fn health_check(&self) -> HealthCheckResult {
        if self.client.has_credentials() {
            HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Healthy, None)
        } else {
            HealthCheckResult::new(
                ADAPTER_ID,
                AdapterHealth::Unhealthy,
                Some("no API key configured".to_string()),
            )
        }
    }
}
