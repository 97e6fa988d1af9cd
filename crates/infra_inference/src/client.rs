//! HTTP transport shared by the inference adapters
//!
//! Wraps a `reqwest::Client` and translates every transport or protocol
//! failure into a [`PortError`]:
//! - 401/403 -> `PortError::Unauthorized`
//! - 404 -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Undecodable bodies -> `PortError::Transformation`

use std::time::{Duration, Instant};

use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::PortError;

use crate::config::InferenceConfig;
use crate::error::InferenceError;

const USER_AGENT: &str = concat!("refund-claims/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY: usize = 512;

/// JSON-over-HTTP client for one backend
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    http: reqwest::Client,
    service: &'static str,
    timeout: Duration,
}

impl JsonHttpClient {
    pub fn new(service: &'static str, timeout: Duration) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            service,
            timeout,
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// POSTs `body` as JSON and decodes the JSON reply
    pub async fn post_json<B, T>(&self, url: &str, bearer: Option<&str>, body: &B) -> Result<T, PortError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let started = Instant::now();
        let mut request = self.http.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(
            service = self.service,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Inference backend responded"
        );

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            let error = map_status(self.service, status, retry_after, &body);
            warn!(service = self.service, status = status.as_u16(), error = %error, "Inference request failed");
            return Err(error);
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            PortError::transformation(format!("{} returned an unexpected body: {}", self.service, e))
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: self.service.to_string(),
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if error.is_connect() || error.is_request() {
            PortError::Connection {
                message: format!("{}: {}", self.service, error),
                source: Some(Box::new(error)),
            }
        } else if error.is_decode() || error.is_body() {
            PortError::transformation(format!("{}: {}", self.service, error))
        } else {
            PortError::Internal {
                message: format!("{}: {}", self.service, error),
                source: Some(Box::new(error)),
            }
        }
    }
}

/// Maps a non-success HTTP status to a port error
pub fn map_status(service: &str, status: StatusCode, retry_after: Option<u64>, body: &str) -> PortError {
    let detail = truncate(body.trim(), MAX_ERROR_BODY);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{} rejected credentials ({}): {}", service, status.as_u16(), detail),
        },
        StatusCode::NOT_FOUND => PortError::not_found(service, detail),
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(0),
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: format!("{} ({})", service, s.as_u16()),
        },
        s => PortError::validation(format!("{} returned {}: {}", service, s.as_u16(), detail)),
    }
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

// ---------------------------------------------------------------------------
// Chat completions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Parts(parts),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// Low-detail image part for a data URI
    pub fn image(url: String) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url, detail: "low" },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
    pub detail: &'static str,
}

/// Structured-output request for a strict JSON schema
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: &'static str,
    pub strict: bool,
    pub schema: serde_json::Value,
}

impl ResponseFormat {
    pub fn strict_schema(name: &'static str, schema: serde_json::Value) -> Self {
        Self {
            kind: "json_schema",
            json_schema: JsonSchemaFormat {
                name,
                strict: true,
                schema,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
    refusal: Option<String>,
}

/// Chat-completions client returning schema-shaped JSON replies
#[derive(Debug, Clone)]
pub struct ChatClient {
    transport: JsonHttpClient,
    url: String,
    api_key: Option<String>,
    max_tokens: u32,
}

impl ChatClient {
    pub fn new(service: &'static str, config: &InferenceConfig) -> Result<Self, InferenceError> {
        config.validate()?;
        Ok(Self {
            transport: JsonHttpClient::new(service, config.timeout())?,
            url: config.chat_completions_url(),
            api_key: config.openai_key().map(str::to_string),
            max_tokens: config.max_tokens,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn service(&self) -> &'static str {
        self.transport.service()
    }

    /// Builds a deterministic request for `model`
    pub fn request(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        response_format: ResponseFormat,
    ) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages,
            max_tokens: self.max_tokens,
            temperature: 0.0,
            response_format,
        }
    }

    /// Sends `request` and decodes the first choice's content as `T`
    pub async fn complete_json<T: DeserializeOwned>(&self, request: &ChatRequest) -> Result<T, PortError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| PortError::Unauthorized {
            message: format!("no API key configured for {}", self.service()),
        })?;
        let response: ChatResponse = self
            .transport
            .post_json(&self.url, Some(api_key), request)
            .await?;
        parse_choice(self.service(), response)
    }
}

fn parse_choice<T: DeserializeOwned>(service: &str, response: ChatResponse) -> Result<T, PortError> {
    let reply = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| PortError::transformation(format!("{} returned no choices", service)))?;

    if let Some(refusal) = reply.refusal {
        return Err(PortError::transformation(format!("{} refused: {}", service, refusal)));
    }
    let content = reply
        .content
        .ok_or_else(|| PortError::transformation(format!("{} returned an empty message", service)))?;
    serde_json::from_str(&content).map_err(|e| {
        PortError::transformation(format!("{} reply does not match the schema: {}", service, e))
    })
}
