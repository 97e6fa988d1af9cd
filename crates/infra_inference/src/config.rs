//! Inference backend configuration

use serde::Deserialize;
use std::time::Duration;

use crate::error::InferenceError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_SENTIMENT_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_SENTIMENT_MODEL: &str = "ProsusAI/finbert";
pub const DEFAULT_IMAGE_ANALYSIS_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_REFUND_ESTIMATION_MODEL: &str = "gpt-4o";

/// Connection settings for the sentiment, vision and estimation backends
///
/// Missing credentials do not prevent construction of the adapters; calls
/// made without them fail as unauthorized and the readiness probe reports
/// the adapter as unhealthy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Bearer token for the chat-completions backend
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    /// Bearer token for the text-classification backend
    pub sentiment_api_key: Option<String>,
    pub sentiment_base_url: String,
    pub sentiment_model: String,
    pub image_analysis_model: String,
    pub refund_estimation_model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            sentiment_api_key: None,
            sentiment_base_url: DEFAULT_SENTIMENT_BASE_URL.to_string(),
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            image_analysis_model: DEFAULT_IMAGE_ANALYSIS_MODEL.to_string(),
            refund_estimation_model: DEFAULT_REFUND_ESTIMATION_MODEL.to_string(),
            max_tokens: 300,
            timeout_secs: 30,
        }
    }
}

impl InferenceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the chat-completions key if one is set and non-blank
    pub fn openai_key(&self) -> Option<&str> {
        non_blank(self.openai_api_key.as_deref())
    }

    pub fn sentiment_key(&self) -> Option<&str> {
        non_blank(self.sentiment_api_key.as_deref())
    }

    /// Returns true if the chat-completions backend has credentials
    pub fn has_chat_credentials(&self) -> bool {
        self.openai_key().is_some()
    }

    /// URL of the text-classification endpoint for the configured model
    pub fn sentiment_url(&self) -> String {
        format!(
            "{}/{}",
            self.sentiment_base_url.trim_end_matches('/'),
            self.sentiment_model
        )
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.openai_base_url.trim_end_matches('/'))
    }

    /// Checks settings that would make every request fail
    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.timeout_secs == 0 {
            return Err(InferenceError::invalid("timeout_secs", "must be greater than zero"));
        }
        if self.max_tokens == 0 {
            return Err(InferenceError::invalid("max_tokens", "must be greater than zero"));
        }
        for (field, url) in [
            ("openai_base_url", &self.openai_base_url),
            ("sentiment_base_url", &self.sentiment_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(InferenceError::invalid(field, "must be an http(s) URL"));
            }
        }
        for (field, model) in [
            ("sentiment_model", &self.sentiment_model),
            ("image_analysis_model", &self.image_analysis_model),
            ("refund_estimation_model", &self.refund_estimation_model),
        ] {
            if model.trim().is_empty() {
                return Err(InferenceError::invalid(field, "must not be blank"));
            }
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = InferenceConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.has_chat_credentials());
        assert_eq!(config.image_analysis_model, "gpt-4o-mini");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = InferenceConfig {
            openai_api_key: Some("  ".into()),
            ..Default::default()
        };
        assert!(config.openai_key().is_none());
    }

    #[test]
    fn test_urls() {
        let config = InferenceConfig {
            openai_base_url: "http://localhost:8080/v1/".into(),
            ..Default::default()
        };
        assert_eq!(config.chat_completions_url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(
            config.sentiment_url(),
            "https://api-inference.huggingface.co/models/ProsusAI/finbert"
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = InferenceConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
