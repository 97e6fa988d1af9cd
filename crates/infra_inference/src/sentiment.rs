//! Text-classification sentiment adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{
    ExtractorError, ExtractorFailure, ExtractorKind, SentimentAnalyzer, SentimentOutcome,
    SentimentResult,
};

use crate::client::JsonHttpClient;
use crate::config::InferenceConfig;
use crate::error::InferenceError;

const ADAPTER_ID: &str = "sentiment-analyzer";

#[derive(Debug, Serialize)]
struct ClassificationRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Hosted classifiers answer with one list per input; some return it flat
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClassificationResponse {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn into_labels(self) -> Vec<LabelScore> {
        match self {
            ClassificationResponse::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassificationResponse::Flat(labels) => labels,
        }
    }
}

/// Picks the winning label and validates the distribution
pub fn summarize(response: ClassificationResponse) -> Result<SentimentResult, String> {
    let mut labels = response.into_labels();
    if labels.is_empty() {
        return Err("classifier returned no labels".to_string());
    }
    if let Some(bad) = labels
        .iter()
        .find(|l| !l.score.is_finite() || !(0.0..=1.0).contains(&l.score))
    {
        return Err(format!("score {} for label '{}' is outside [0, 1]", bad.score, bad.label));
    }

    labels.sort_by(|a, b| b.score.total_cmp(&a.score));
    let detail = labels
        .iter()
        .map(|l| format!("{} {:.2}", l.label, l.score))
        .collect::<Vec<_>>()
        .join(", ");
    let top = labels.swap_remove(0);

    Ok(SentimentResult {
        score: top.score,
        label: top.label,
        detail,
    })
}

/// Sentiment analyzer backed by a hosted text-classification model
#[derive(Debug, Clone)]
pub struct HttpSentimentAnalyzer {
    client: JsonHttpClient,
    url: String,
    api_key: Option<String>,
}

impl HttpSentimentAnalyzer {
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        config.validate()?;
        Ok(Self {
            client: JsonHttpClient::new("sentiment", config.timeout())?,
            url: config.sentiment_url(),
            api_key: config.sentiment_key().map(str::to_string),
        })
    }

    async fn classify(&self, text: &str) -> Result<ClassificationResponse, PortError> {
        self.client
            .post_json(&self.url, self.api_key.as_deref(), &ClassificationRequest { inputs: text })
            .await
    }
}

impl DomainPort for HttpSentimentAnalyzer {}

#[async_trait]
impl SentimentAnalyzer for HttpSentimentAnalyzer {
    #[instrument(skip_all, fields(chars = text.len()))]
    async fn analyze(&self, text: &str) -> SentimentOutcome {
        let response = self
            .classify(text)
            .await
            .map_err(|e| ExtractorError::from_port(ExtractorKind::Sentiment, &e))?;

        let result = summarize(response).map_err(|message| {
            ExtractorError::new(ExtractorKind::Sentiment, ExtractorFailure::InvalidResponse, message)
        })?;
        debug!(label = %result.label, score = result.score, "Sentiment classified");
        Ok(result)
    }
}

#[async_trait]
impl HealthCheckable for HttpSentimentAnalyzer {
    async fn health_check(&self) -> HealthCheckResult {
        // Anonymous access works but is heavily rate limited.
        match self.api_key {
            Some(_) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Healthy, None),
            None => HealthCheckResult::new(
                ADAPTER_ID,
                AdapterHealth::Degraded,
                Some("no API token configured; using anonymous access".to_string()),
            ),
        }
    }
}
