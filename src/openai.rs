//! OpenAI client configuration with sensible defaults.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client for the given API key.
///
/// Uses a 5-minute timeout by default to prevent hung API calls.
pub fn create_client(api_key: &str) -> Client<OpenAIConfig> {
    create_client_with_base(api_key, None)
}

/// Create a client for an OpenAI-compatible endpoint.
///
/// When `api_base` is set the client talks to that endpoint instead of the
/// default OpenAI API (e.g. OpenRouter for completions).
pub fn create_client_with_base(api_key: &str, api_base: Option<&str>) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client");

    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base) = api_base {
        config = config.with_api_base(base);
    }

    Client::with_config(config).with_http_client(http_client)
}
