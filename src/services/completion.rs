//! Chat-completion provider abstraction and the hosted-API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CompletionError;
use crate::models::{API_KEY_ENV, ChatMessage, CompletionConfig};

/// A service that turns a message sequence into an answer.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: String,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiChat {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiChat {
    /// Create a client from configuration, reading the API key from the
    /// process environment.
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| CompletionError::MissingApiKey(API_KEY_ENV.to_string()))?;
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(
        config: &CompletionConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::ProviderError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionProvider for OpenAiChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = CompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| RequestMessage {
                    role: m.role.to_string(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(messages = messages.len(), model = %self.model, "requesting completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::RequestError(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::ProviderError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("no completion choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = CompletionConfig::default();
        let client = OpenAiChat::with_api_key(&config, "test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trimming() {
        let config = CompletionConfig {
            base_url: "https://api.openai.com/v1/".to_string(),
            ..Default::default()
        };
        let client = OpenAiChat::with_api_key(&config, "test-key").unwrap();
        assert_eq!(client.base_url(), "https://api.openai.com/v1");
    }
}
