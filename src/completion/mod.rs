mod openai;

pub use openai::OpenAiClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Answer returned when the model produces no text
pub const EMPTY_COMPLETION_FALLBACK: &str = "The AI did not return a response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// A single-turn chat completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// A hosted chat-completion API.
///
/// Returns `Ok(None)` when the API answered but produced no message content.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn chat(&self, request: &CompletionRequest) -> Result<Option<String>>;
}

/// Sends one system/user message pair per call to the configured model.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Dispatcher {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a completion. Empty completions become [`EMPTY_COMPLETION_FALLBACK`];
    /// transport and API failures are returned as errors.
    pub async fn complete(&self, system_prompt: &str, user_message: &str, temperature: f32) -> Result<String> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user_message.to_string(),
                },
            ],
            temperature,
        };

        debug!(
            model = %request.model,
            temperature = request.temperature,
            system_len = system_prompt.len(),
            "sending completion request"
        );

        match self.client.chat(&request).await? {
            Some(text) if !text.is_empty() => Ok(text),
            _ => {
                warn!(model = %self.model, "completion API returned no text");
                Ok(EMPTY_COMPLETION_FALLBACK.to_string())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::TutorError;
    use std::sync::Mutex;

    pub enum StubReply {
        Text(String),
        Empty,
        Missing,
        Fail(String),
    }

    /// Completion client that records requests and answers with a canned reply
    pub struct StubClient {
        reply: StubReply,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl StubClient {
        pub fn new(reply: StubReply) -> Arc<Self> {
            Arc::new(StubClient {
                reply,
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn text(text: &str) -> Arc<Self> {
            Self::new(StubReply::Text(text.to_string()))
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for StubClient {
        async fn chat(&self, request: &CompletionRequest) -> Result<Option<String>> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                StubReply::Text(text) => Ok(Some(text.clone())),
                StubReply::Empty => Ok(Some(String::new())),
                StubReply::Missing => Ok(None),
                StubReply::Fail(message) => Err(TutorError::Completion(message.clone())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{StubClient, StubReply};
    use super::*;
    use crate::error::TutorError;

    #[tokio::test]
    async fn test_sends_system_then_user() {
        let stub = StubClient::text("4");
        let dispatcher = Dispatcher::new(stub.clone(), "gpt-4o-mini");

        let answer = dispatcher.complete("be a tutor", "What is 2+2?", 0.2).await.unwrap();
        assert_eq!(answer, "4");

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, "be a tutor");
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "What is 2+2?");
    }

    #[tokio::test]
    async fn test_empty_completion_falls_back() {
        for reply in [StubReply::Empty, StubReply::Missing] {
            let dispatcher = Dispatcher::new(StubClient::new(reply), "m");
            let answer = dispatcher.complete("s", "u", 0.3).await.unwrap();
            assert_eq!(answer, EMPTY_COMPLETION_FALLBACK);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let dispatcher = Dispatcher::new(StubClient::new(StubReply::Fail("rate limited".to_string())), "m");
        let err = dispatcher.complete("s", "u", 0.3).await.unwrap_err();
        assert!(matches!(err, TutorError::Completion(_)));
        assert_eq!(err.to_string(), "AI Error: rate limited");
    }

    #[test]
    fn test_request_wire_shape() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: Role::System,
                content: "hi".to_string(),
            }],
            temperature: 0.5,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["temperature"], 0.5);
    }
}
