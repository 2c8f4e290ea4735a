//! API credentials, read from the environment once at startup.

use crate::error::{Result, SvarError};

/// API keys for the external providers.
///
/// Populated once at startup and passed down to collaborators; nothing
/// re-reads the environment after this.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// OpenAI API key, used for embeddings and as the completion fallback.
    pub openai_api_key: String,
    /// Key for an alternate completion provider (e.g. OpenRouter).
    pub completion_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the environment.
    ///
    /// `OPENAI_API_KEY` is required; its absence is a fatal startup error.
    /// `OPENROUTER_API_KEY` is optional and only consulted when an alternate
    /// completion endpoint is configured.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var("OPENAI_API_KEY").ok(),
            std::env::var("OPENROUTER_API_KEY").ok(),
        )
    }

    /// Build credentials from explicit values, validating the required key.
    pub fn from_values(
        openai_api_key: Option<String>,
        completion_api_key: Option<String>,
    ) -> Result<Self> {
        let openai_api_key = match openai_api_key {
            Some(key) if !key.is_empty() => key,
            Some(_) => {
                return Err(SvarError::Config(
                    "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'"
                        .to_string(),
                ))
            }
            None => {
                return Err(SvarError::Config(
                    "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            openai_api_key,
            completion_api_key: completion_api_key.filter(|key| !key.is_empty()),
        })
    }

    /// Key to use for the completion provider.
    ///
    /// Falls back to the OpenAI key when no alternate key is set.
    pub fn completion_key(&self) -> &str {
        self.completion_api_key
            .as_deref()
            .unwrap_or(&self.openai_api_key)
    }
}
