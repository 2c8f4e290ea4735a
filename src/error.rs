//! Error types for Svar.

use thiserror::Error;

/// Library-level error type for Svar operations.
#[derive(Error, Debug)]
pub enum SvarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Embedding cache error: {0}")]
    Cache(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Answer generation failed: {0}")]
    Completion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),
}

/// Result type alias for Svar operations.
pub type Result<T> = std::result::Result<T, SvarError>;
