use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::errors::{AppError, AppResult};

/// Single-turn text completion against a hosted language model.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Groq exposes an OpenAI-compatible chat endpoint, so the OpenAI client is pointed at it.
pub struct GroqCompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GroqCompletionClient {
    pub fn new(api_key: &SecretString, api_base: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl CompletionClient for GroqCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response: ChatCompletionBody = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| {
                log::error!("Completion request to model {} failed: {}", self.model, e);
                AppError::from(e)
            })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::UpstreamError("Completion response contained no message".to_string())
            })?;

        log::debug!("Completion output: {}", content);
        Ok(content)
    }
}
