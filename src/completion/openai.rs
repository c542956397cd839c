use super::{CompletionClient, CompletionRequest};
use crate::config::CompletionConfig;
use crate::error::{Result, TutorError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::error;

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint.
/// Built once at startup; `reqwest::Client` pools connections internally.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_url: String,
    api_key: String,
    timeout_seconds: u64,
}

impl OpenAiClient {
    pub fn new(config: &CompletionConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| TutorError::Completion(format!("Failed to create HTTP client: {}", e)))?;

        Ok(OpenAiClient {
            client,
            api_url: config.api_url.clone(),
            api_key,
            timeout_seconds: config.timeout_seconds,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn chat(&self, request: &CompletionRequest) -> Result<Option<String>> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.api_url, error = %e, "completion request failed");
                if e.is_timeout() {
                    TutorError::CompletionTimeout(self.timeout_seconds)
                } else {
                    TutorError::Completion(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TutorError::Completion(format!(
                "API returned status {}: {}",
                status,
                body.trim()
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TutorError::Completion(format!("Failed to parse response: {}", e)))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
