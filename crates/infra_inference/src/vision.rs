//! Vision chat model defect adapter

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};
use domain_claims::{
    DefectAnalyzer, DefectOutcome, DefectResult, ExtractorError, ExtractorFailure, ExtractorKind,
    ImageRef, ProductContext,
};

use crate::client::{ChatClient, ChatMessage, ChatRequest, ContentPart, ResponseFormat};
use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::images::encode_all;
use crate::prompts::{defect_schema, product_prompt, IMAGE_ANALYSIS_SYSTEM_PROMPT};

const ADAPTER_ID: &str = "vision-defect-analyzer";

#[derive(Debug, Deserialize)]
pub struct DefectReply {
    pub detected_defects: Vec<String>,
    pub defect_score: f64,
}

/// Validates a decoded reply
pub fn validate_reply(reply: DefectReply) -> Result<DefectResult, String> {
    if !reply.defect_score.is_finite() || !(0.0..=1.0).contains(&reply.defect_score) {
        return Err(format!("defect_score {} is outside [0, 1]", reply.defect_score));
    }
    Ok(DefectResult {
        detected_defects: reply
            .detected_defects
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect(),
        defect_score: reply.defect_score,
    })
}

/// Defect analyzer backed by a vision-capable chat model
#[derive(Debug, Clone)]
pub struct VisionDefectAnalyzer {
    client: ChatClient,
    model: String,
}

impl VisionDefectAnalyzer {
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        Ok(Self {
            client: ChatClient::new("vision", config)?,
            model: config.image_analysis_model.clone(),
        })
    }

    /// Builds the chat request for already-encoded images
    pub fn build_request(&self, data_uris: Vec<String>, product: &ProductContext) -> ChatRequest {
        let mut parts = Vec::with_capacity(data_uris.len() + 1);
        parts.push(ContentPart::text(product_prompt(product)));
        parts.extend(data_uris.into_iter().map(ContentPart::image));

        self.client.request(
            &self.model,
            vec![
                ChatMessage::system(IMAGE_ANALYSIS_SYSTEM_PROMPT),
                ChatMessage::user(parts),
            ],
            ResponseFormat::strict_schema("image_analysis", defect_schema()),
        )
    }
}

impl DomainPort for VisionDefectAnalyzer {}

#[async_trait]
impl DefectAnalyzer for VisionDefectAnalyzer {
    #[instrument(skip_all, fields(images = images.len(), product = %product.name))]
    async fn analyze(&self, images: &[ImageRef], product: &ProductContext) -> DefectOutcome {
        if images.is_empty() {
            info!("No product images supplied; reporting no visual evidence");
            return Ok(DefectResult::no_visual_evidence());
        }

        let data_uris = encode_all(images).await.map_err(|e| {
            warn!(image = %e.image, reason = %e.reason, "Image encoding failed");
            ExtractorError::new(ExtractorKind::Defect, ExtractorFailure::ImageEncoding, e.to_string())
        })?;

        let request = self.build_request(data_uris, product);
        let reply: DefectReply = self
            .client
            .complete_json(&request)
            .await
            .map_err(|e| ExtractorError::from_port(ExtractorKind::Defect, &e))?;

        let result = validate_reply(reply).map_err(|message| {
            ExtractorError::new(ExtractorKind::Defect, ExtractorFailure::InvalidResponse, message)
        })?;
        debug!(
            defects = result.detected_defects.len(),
            score = result.defect_score,
            "Defects assessed"
        );
        Ok(result)
    }
}

#[async_trait]
impl HealthCheckable for VisionDefectAnalyzer {
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
