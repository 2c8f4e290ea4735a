//! Configuration settings for Svar.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub corpus: CorpusSettings,
    pub cache: CacheSettings,
    pub embedding: EmbeddingSettings,
    pub completion: CompletionSettings,
    pub retrieval: RetrievalSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.svar".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Corpus file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSettings {
    /// Path to the corpus file (one segment per line).
    pub path: String,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            path: "content.txt".to_string(),
        }
    }
}

/// Embedding cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Path to the embedding cache file.
    pub path: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            path: "~/.svar/embeddings.json".to_string(),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Answer generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// LLM model for answer generation.
    pub model: String,
    /// Base URL of an OpenAI-compatible completion endpoint (e.g. OpenRouter).
    /// Uses the default OpenAI API when unset.
    pub base_url: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            base_url: None,
            temperature: 0.7,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of top-ranked segments passed to the completion model.
    pub top_k: usize,
    /// Minimum similarity score for a segment to be considered.
    pub min_score: f32,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: 3,
            min_score: 0.0,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SvarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("svar")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded corpus file path.
    pub fn corpus_path(&self) -> PathBuf {
        Self::expand_path(&self.corpus.path)
    }

    /// Get the expanded embedding cache path.
    pub fn cache_path(&self) -> PathBuf {
        Self::expand_path(&self.cache.path)
    }
}
