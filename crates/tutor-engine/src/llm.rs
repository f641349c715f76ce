//! LLM Client implementation
//!
//! Chat-completions client for OpenAI and API-compatible providers.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tutor_core::{LlmClient, LlmConfig, Result, TutorError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

// ============================================================================
// OpenAI Client
// ============================================================================

/// OpenAI API client
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            temperature,
            timeout: Duration::from_secs(LlmConfig::default().timeout_secs),
        }
    }

    /// Create from config
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        if config.openai_api_key.trim().is_empty() {
            return Err(TutorError::ConfigError(
                "OpenAI API key required".to_string(),
            ));
        }

        let base_url = config
            .openai_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(&config.openai_api_key, &config.model, config.temperature)
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(config.timeout_secs)))
    }

    /// Set custom base URL (for compatible APIs)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the transport-level request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = OpenAiRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TutorError::Timeout(self.timeout)
                } else {
                    TutorError::Upstream(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TutorError::Upstream(describe_error(status, &error_text)));
        }

        let result: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TutorError::Timeout(self.timeout)
                } else {
                    TutorError::Upstream(format!("Failed to parse response: {e}"))
                }
            })?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| TutorError::Upstream("No response generated".to_string()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Prefer the provider's own error message when the body carries one
fn describe_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<OpenAiErrorResponse>(body) {
        Ok(parsed) => format!("OpenAI error ({status}): {}", parsed.error.message),
        Err(_) => format!("OpenAI error ({status}): {body}"),
    }
}

// ============================================================================
// Tests
// ============================================================================
