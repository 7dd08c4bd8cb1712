//! watsonx.ai chat-completions provider.
//!
//! Sends a single-turn chat request to the watsonx text/chat endpoint and
//! unwraps the assistant's message content. The wire shape is close
//! enough to OpenAI's that this also works against OpenAI-compatible
//! endpoints that accept a `model_id`-less payload, but watsonx is the
//! reference target.
//!
//! There is deliberately no retry or backoff here: a failed call surfaces
//! to the loop controller as a terminal error for that session.

use async_trait::async_trait;
use sensai_core::error::TransportError;
use sensai_core::provider::Provider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A watsonx.ai chat-completion provider.
#[derive(Debug)]
pub struct WatsonxProvider {
    api_url: String,
    api_key: String,
    model_id: String,
    project_id: Option<String>,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl WatsonxProvider {
    /// Create a new provider for the given endpoint and model.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            model_id: model_id.into(),
            project_id: None,
            temperature: 0.4,
            max_tokens: 2000,
            client,
        }
    }

    /// Build a provider from application configuration.
    pub fn from_config(config: &sensai_config::ProviderConfig) -> Result<Self, TransportError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                TransportError::AuthenticationFailed("No API key configured".into())
            })?;

        let mut provider = Self::new(&config.api_url, api_key, &config.model_id);
        provider.project_id = config.project_id.clone();
        provider.temperature = config.temperature;
        provider.max_tokens = config.max_tokens;
        Ok(provider)
    }

    /// Set the project the requests are billed against.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn build_payload(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model_id: self.model_id.clone(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
            project_id: self.project_id.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            top_p: 1.0,
        }
    }
}

#[async_trait]
impl Provider for WatsonxProvider {
    fn name(&self) -> &str {
        "watsonx"
    }

    async fn complete(&self, prompt: &str) -> Result<String, TransportError> {
        let payload = self.build_payload(prompt);

        debug!(model = %self.model_id, prompt_chars = prompt.len(), "Sending completion request");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(e.to_string())
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(TransportError::RateLimited { retry_after_secs: 5 });
        }

        if status == 401 || status == 403 {
            return Err(TransportError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(TransportError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let envelope: ChatResponse =
            response.json().await.map_err(|e| TransportError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(TransportError::EmptyCompletion)?;

        Ok(content)
    }
}

// --- watsonx API types (internal) ---

#[derive(Debug, Serialize)]
struct ChatRequest {
    model_id: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<String>,
    temperature: f32,
    max_tokens: u32,
    frequency_penalty: f32,
    presence_penalty: f32,
    top_p: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
