//! API configuration

use serde::Deserialize;

use core_kernel::WarrantyWindow;
use infra_inference::InferenceConfig;

/// API configuration
///
/// Read from `API_`-prefixed environment variables. Nested inference
/// settings use a double underscore, e.g. `API_INFERENCE__OPENAI_API_KEY`.
/// The conventional `OPENAI_API_KEY` and `HF_API_TOKEN` variables are used
/// when no prefixed key is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Days after the order date during which a claim is accepted
    pub warranty_days: u32,
    /// Inference backends
    pub inference: InferenceConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            warranty_days: WarrantyWindow::STANDARD.days(),
            inference: InferenceConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut config: ApiConfig = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if config.inference.openai_api_key.is_none() {
            config.inference.openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if config.inference.sentiment_api_key.is_none() {
            config.inference.sentiment_api_key = std::env::var("HF_API_TOKEN").ok();
        }
        Ok(config)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn warranty_window(&self) -> WarrantyWindow {
        WarrantyWindow::new(self.warranty_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.warranty_window(), WarrantyWindow::STANDARD);
        assert_eq!(config.inference.refund_estimation_model, "gpt-4o");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ApiConfig = serde_json::from_value(serde_json::json!({
            "port": 9000,
            "inference": {"timeout_secs": 5}
        }))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.inference.timeout_secs, 5);
        assert_eq!(config.inference.sentiment_model, "ProsusAI/finbert");
    }
}
