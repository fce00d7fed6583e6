//! OpenRouter chat provider (OpenAI-compatible API)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::LlmConfig;
use crate::provider::{ChatError, ChatMessage, ChatProvider, ChatRequest, ChatResponse};

/// OpenRouter API request format (OpenAI-compatible)
#[derive(Debug, Serialize)]
struct OpenRouterRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// OpenRouter API response format
#[derive(Debug, Deserialize)]
struct OpenRouterResponse {
    choices: Vec<Choice>,
    model: String,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    // null for refusals and some tool-only replies
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// OpenRouter provider
#[derive(Debug)]
pub struct OpenRouterProvider {
    /// API key
    api_key: String,
    /// HTTP client
    client: reqwest::Client,
    /// Base URL
    base_url: String,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from a loaded configuration
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// Override the base URL (e.g. for a proxy)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .is_ok()
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let start = Instant::now();
        let url = format!("{}/chat/completions", self.base_url);

        let messages = request
            .messages
            .iter()
            .map(|m: &ChatMessage| Message {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect();

        let api_request = OpenRouterRequest {
            model: request.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(model = %request.model, turns = request.messages.len(), "chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ChatError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::RequestFailed(format!(
                "Status: {}, Body: {}",
                status, body
            )));
        }

        let api_response: OpenRouterResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        let content = api_response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(ChatResponse {
            content,
            model: api_response.model,
            tokens_used: api_response.usage.map(|u| u.total_tokens),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ChatMessage;

    #[tokio::test]
    #[ignore = "Requires OPENROUTER_API_KEY"]
    async fn test_openrouter() {
        let api_key = std::env::var("OPENROUTER_API_KEY").expect("OPENROUTER_API_KEY not set");
        let provider = OpenRouterProvider::new(&api_key);

        if provider.is_available().await {
            let request = ChatRequest::new(
                "openai/gpt-4.1",
                vec![ChatMessage::user("Say hello in one word")],
            );
            let response = provider.complete(request).await.unwrap();
            assert!(!response.content.is_empty());
            println!("OpenRouter response: {}", response.content);
        }
    }
}
