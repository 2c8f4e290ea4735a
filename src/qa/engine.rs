//! The question answering engine.

use super::format_context_for_prompt;
use crate::cache::EmbeddingCache;
use crate::completion::Completer;
use crate::config::{Prompts, RetrievalSettings};
use crate::corpus::Segment;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::retrieval::{rank, ScoredSegment, SegmentEmbedding};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Answer shown when ranking finds no usable context.
const NO_CONTEXT_ANSWER: &str =
    "I couldn't find any relevant information in your corpus for this question.";

/// Question answering engine.
///
/// Owns the corpus segments and the embedding cache for the lifetime of a
/// session; the providers sit behind trait objects so they can be swapped
/// out in tests.
pub struct QaEngine {
    segments: Vec<Segment>,
    cache: EmbeddingCache,
    cache_path: PathBuf,
    embedder: Arc<dyn Embedder>,
    completer: Arc<dyn Completer>,
    prompts: Prompts,
    top_k: usize,
    min_score: f32,
    records: Vec<SegmentEmbedding>,
}

/// Outcome of an indexing pass.
#[derive(Debug, Clone, Copy)]
pub struct IndexReport {
    /// Segments newly embedded this pass.
    pub embedded: usize,
    /// Segments served from the cache.
    pub reused: usize,
}

/// An answer with the segments it was grounded in.
#[derive(Debug, Clone)]
pub struct QaResponse {
    /// The generated answer.
    pub answer: String,
    /// Ranked source segments passed as context.
    pub sources: Vec<ScoredSegment>,
}

impl QaEngine {
    /// Create a new engine.
    pub fn new(
        segments: Vec<Segment>,
        cache: EmbeddingCache,
        cache_path: PathBuf,
        embedder: Arc<dyn Embedder>,
        completer: Arc<dyn Completer>,
        prompts: Prompts,
        retrieval: &RetrievalSettings,
    ) -> Self {
        Self {
            segments,
            cache,
            cache_path,
            embedder,
            completer,
            prompts,
            top_k: retrieval.top_k,
            min_score: retrieval.min_score,
            records: Vec::new(),
        }
    }

    /// Number of corpus segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Embed every segment missing from the cache and flush it to disk.
    ///
    /// Must run before the first query; afterwards every active segment has
    /// exactly one cached vector. A provider failure here is fatal to the
    /// operation, not retried.
    #[instrument(skip(self))]
    pub async fn ensure_indexed(&mut self) -> Result<IndexReport> {
        // Unique missing texts; duplicate corpus lines share one embedding.
        let mut missing: Vec<String> = Vec::new();
        for segment in &self.segments {
            if !self.cache.contains(&segment.text) && !missing.contains(&segment.text) {
                missing.push(segment.text.clone());
            }
        }

        let reused = self.segments.len() - missing.len();

        if !missing.is_empty() {
            info!("Embedding {} new segments", missing.len());
            let embeddings = self.embedder.embed_batch(&missing).await?;
            for (text, embedding) in missing.iter().zip(embeddings) {
                self.cache.insert(text.clone(), embedding);
            }
            self.cache.flush(&self.cache_path)?;
        }

        self.records = self
            .segments
            .iter()
            .map(|segment| SegmentEmbedding {
                segment: segment.clone(),
                embedding: self
                    .cache
                    .get(&segment.text)
                    .map(|e| e.to_vec())
                    .unwrap_or_default(),
            })
            .collect();

        debug!(
            "Index ready: {} segments ({} newly embedded)",
            self.records.len(),
            missing.len()
        );

        Ok(IndexReport {
            embedded: missing.len(),
            reused,
        })
    }

    /// Embed a query and return the ranked segments without generating an
    /// answer.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<Vec<ScoredSegment>> {
        self.search_with(query, self.top_k, self.min_score).await
    }

    /// Search with explicit limit and threshold.
    pub async fn search_with(
        &self,
        query: &str,
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<ScoredSegment>> {
        let query_embedding = self.embedder.embed(query).await?;
        Ok(rank(&query_embedding, &self.records, limit, min_score))
    }

    /// Answer a question grounded in the best-matching segments.
    ///
    /// The question embedding is transient; it is never written to the cache.
    /// Each call is independent of prior calls.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn answer(&self, question: &str) -> Result<QaResponse> {
        info!("Processing question: {}", question);

        let sources = self.search(question).await?;

        if sources.is_empty() {
            return Ok(QaResponse {
                answer: NO_CONTEXT_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), question.to_string());
        vars.insert("context".to_string(), format_context_for_prompt(&sources));

        let user_prompt = self.prompts.render_with_custom(&self.prompts.qa.user, &vars);

        let answer = self
            .completer
            .complete(&self.prompts.qa.system, &user_prompt)
            .await?;

        debug!("Answered with {} source segments", sources.len());

        Ok(QaResponse { answer, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SvarError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Deterministic embedder: maps texts onto axis-aligned vectors by
    /// keyword so similarity is predictable.
    struct KeywordEmbedder {
        calls: AtomicUsize,
    }

    impl KeywordEmbedder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn vector_for(text: &str) -> Vec<f32> {
            if text.contains("Alphabet") {
                vec![1.0, 0.0]
            } else if text.contains("Nvidia") {
                vec![0.0, 1.0]
            } else {
                vec![0.0, 0.0]
            }
        }
    }

    #[async_trait]
    impl Embedder for KeywordEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Self::vector_for(text))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(texts.len(), Ordering::SeqCst);
            Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    /// Completer stub that records the prompts it receives.
    struct RecordingCompleter {
        received: Mutex<Vec<(String, String)>>,
    }

    impl RecordingCompleter {
        fn new() -> Self {
            Self {
                received: Mutex::new(Vec::new()),
            }
        }

        fn last_user_prompt(&self) -> Option<String> {
            self.received
                .lock()
                .unwrap()
                .last()
                .map(|(_, user)| user.clone())
        }

        fn call_count(&self) -> usize {
            self.received.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Completer for RecordingCompleter {
        async fn complete(&self, system: &str, user: &str) -> Result<String> {
            self.received
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            Ok("Alphabet dropped 8 percent.".to_string())
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn news_segments() -> Vec<Segment> {
        vec![
            Segment {
                index: 0,
                text: "Alphabet dropped 8 percent.".to_string(),
            },
            Segment {
                index: 1,
                text: "Nvidia stock rose.".to_string(),
            },
        ]
    }

    fn engine_with(
        segments: Vec<Segment>,
        cache_path: PathBuf,
        embedder: Arc<KeywordEmbedder>,
        completer: Arc<RecordingCompleter>,
    ) -> QaEngine {
        QaEngine::new(
            segments,
            EmbeddingCache::new("stub-model"),
            cache_path,
            embedder,
            completer,
            Prompts::default(),
            &RetrievalSettings {
                top_k: 1,
                min_score: 0.0,
            },
        )
    }

    #[tokio::test]
    async fn test_answer_selects_best_segment_as_context() {
        let dir = tempfile::tempdir().unwrap();
        let embedder = Arc::new(KeywordEmbedder::new());
        let completer = Arc::new(RecordingCompleter::new());

        let mut engine = engine_with(
            news_segments(),
            dir.path().join("cache.json"),
            embedder,
            completer.clone(),
        );
        engine.ensure_indexed().await.unwrap();

        let response = engine
            .answer("How much has Alphabet dropped?")
            .await
            .unwrap();

        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].index, 0);
        assert_eq!(response.sources[0].text, "Alphabet dropped 8 percent.");

        let prompt = completer.last_user_prompt().unwrap();
        assert!(prompt.contains("Alphabet dropped 8 percent."));
        assert!(!prompt.contains("Nvidia"));
        assert!(prompt.contains("How much has Alphabet dropped?"));
    }

    #[tokio::test]
    async fn test_ensure_indexed_reuses_cache_across_engines() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");

        let first_embedder = Arc::new(KeywordEmbedder::new());
        let mut engine = engine_with(
            news_segments(),
            cache_path.clone(),
            first_embedder.clone(),
            Arc::new(RecordingCompleter::new()),
        );
        let report = engine.ensure_indexed().await.unwrap();
        assert_eq!(report.embedded, 2);
        assert_eq!(report.reused, 0);
        assert_eq!(first_embedder.calls.load(Ordering::SeqCst), 2);

        // A second session loads the flushed cache and never calls the
        // embedding provider for the corpus.
        let second_embedder = Arc::new(KeywordEmbedder::new());
        let mut engine = QaEngine::new(
            news_segments(),
            EmbeddingCache::load(&cache_path, "stub-model"),
            cache_path,
            second_embedder.clone(),
            Arc::new(RecordingCompleter::new()),
            Prompts::default(),
            &RetrievalSettings::default(),
        );
        let report = engine.ensure_indexed().await.unwrap();
        assert_eq!(report.embedded, 0);
        assert_eq!(report.reused, 2);
        assert_eq!(second_embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_answer_without_context_skips_completer() {
        let dir = tempfile::tempdir().unwrap();
        let completer = Arc::new(RecordingCompleter::new());

        let mut engine = engine_with(
            Vec::new(),
            dir.path().join("cache.json"),
            Arc::new(KeywordEmbedder::new()),
            completer.clone(),
        );
        engine.ensure_indexed().await.unwrap();

        let response = engine.answer("Anything?").await.unwrap();
        assert!(response.sources.is_empty());
        assert_eq!(response.answer, NO_CONTEXT_ANSWER);
        assert_eq!(completer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_embedding_failure_surfaces_from_answer() {
        struct FailingEmbedder;

        #[async_trait]
        impl Embedder for FailingEmbedder {
            async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
                Err(SvarError::Embedding("rate limited".to_string()))
            }

            async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
                Err(SvarError::Embedding("rate limited".to_string()))
            }

            fn dimensions(&self) -> usize {
                2
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let mut engine = QaEngine::new(
            news_segments(),
            EmbeddingCache::new("stub-model"),
            dir.path().join("cache.json"),
            Arc::new(FailingEmbedder),
            Arc::new(RecordingCompleter::new()),
            Prompts::default(),
            &RetrievalSettings::default(),
        );

        // Fatal while indexing the corpus.
        assert!(matches!(
            engine.ensure_indexed().await,
            Err(SvarError::Embedding(_))
        ));
    }
}
