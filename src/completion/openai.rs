//! OpenAI-compatible chat completion implementation.
//!
//! Talks to the default OpenAI endpoint, or to any OpenAI-compatible
//! endpoint (e.g. OpenRouter) when a base URL is configured.

use super::Completer;
use crate::error::{Result, SvarError};
use crate::openai::create_client_with_base;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Chat-completion based answer generator.
pub struct OpenAICompleter {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAICompleter {
    /// Create a new completer.
    ///
    /// `base_url` selects an alternate OpenAI-compatible endpoint; `None`
    /// uses the default OpenAI API.
    pub fn new(api_key: &str, base_url: Option<&str>, model: &str, temperature: f32) -> Self {
        Self {
            client: create_client_with_base(api_key, base_url),
            model: model.to_string(),
            temperature,
        }
    }
}

#[async_trait]
impl Completer for OpenAICompleter {
    #[instrument(skip(self, system, user))]
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| SvarError::Completion(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()
                .map_err(|e| SvarError::Completion(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| SvarError::Completion(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SvarError::OpenAI(format!("Completion API error: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| SvarError::Completion("Empty response from model".to_string()))?
            .clone();

        debug!("Generated {} chars", answer.len());
        Ok(answer)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completer_creation() {
        let completer = OpenAICompleter::new("sk-test", None, "gpt-4.1-mini", 0.7);
        assert_eq!(completer.model(), "gpt-4.1-mini");

        let alternate = OpenAICompleter::new(
            "sk-or",
            Some("https://openrouter.ai/api/v1"),
            "openrouter/auto",
            0.2,
        );
        assert_eq!(alternate.model(), "openrouter/auto");
    }
}
