//! Text-generation backend client.
//!
//! [`ChatBackend`] is the injectable seam the invoker and coach talk
//! through; [`AnthropicClient`] is the real implementation over the
//! Messages API. Test stubs implement the trait in-memory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LlmError, LlmResult};

/// Default Messages API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const API_VERSION: &str = "2023-06-01";

/// Role of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One conversation turn sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A text-generation backend: system framing plus conversation in, raw
/// text out. One round trip, no retries.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> LlmResult<String>;
}

/// Backend configuration, environment-driven by default.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Messages API endpoint.
    pub api_url: String,
    /// API key; `None` means unconfigured and every call fails early.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Completion token budget per call.
    pub max_tokens: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            api_url: std::env::var("MOCKPANEL_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            model: std::env::var("MOCKPANEL_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens: 1500,
        }
    }
}

impl BackendConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn new(api_url: &str, model: &str) -> Self {
        BackendConfig {
            api_url: api_url.to_string(),
            api_key: None,
            model: model.to_string(),
            max_tokens: 1500,
        }
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Messages API client.
pub struct AnthropicClient {
    config: BackendConfig,
    http_client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(config: BackendConfig) -> LlmResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("mockpanel/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(AnthropicClient {
            config,
            http_client,
        })
    }

    /// Client from environment variables.
    pub fn from_env() -> LlmResult<Self> {
        Self::new(BackendConfig::from_env())
    }
}

#[async_trait]
impl ChatBackend for AnthropicClient {
    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> LlmResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages,
        };

        debug!(model = %self.config.model, turns = messages.len(), "backend call");
        let response = self
            .http_client
            .post(&self.config.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let body: MessagesResponse = response.json().await?;
        body.content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or(LlmError::EmptyResponse)
    }
}
