//! OpenAI embeddings implementation.

use super::Embedder;
use crate::error::{Result, SvarError};
use crate::openai::create_client;
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI-based embedder.
pub struct OpenAIEmbedder {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    dimensions: usize,
}

impl OpenAIEmbedder {
    /// Create a new OpenAI embedder.
    pub fn new(api_key: &str, model: &str, dimensions: usize) -> Self {
        Self {
            client: create_client(api_key),
            model: model.to_string(),
            dimensions,
        }
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| SvarError::Embedding("Empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        // OpenAI has a limit on batch size, process in chunks
        const BATCH_SIZE: usize = 100;
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(BATCH_SIZE) {
            let input: Vec<String> = chunk.to_vec();

            let request = CreateEmbeddingRequestArgs::default()
                .model(&self.model)
                .input(EmbeddingInput::StringArray(input))
                .dimensions(self.dimensions as u32)
                .build()
                .map_err(|e| SvarError::Embedding(format!("Failed to build request: {}", e)))?;

            let response = self
                .client
                .embeddings()
                .create(request)
                .await
                .map_err(|e| SvarError::OpenAI(format!("Embedding API error: {}", e)))?;

            // Sort by index to ensure correct order
            let mut embeddings: Vec<_> = response.data.into_iter().collect();
            embeddings.sort_by_key(|e| e.index);

            for embedding_data in embeddings {
                all_embeddings.push(embedding_data.embedding);
            }
        }

        debug!("Generated {} embeddings", all_embeddings.len());
        Ok(all_embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
