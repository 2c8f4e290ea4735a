//! Svar - Corpus Question Answering
//!
//! A CLI tool for asking natural-language questions against a small
//! plain-text corpus, grounded in its most relevant lines.
//!
//! The name "Svar" comes from the Norwegian/Scandinavian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Embed a line-per-segment text corpus once and cache the vectors to disk
//! - Ask questions and get AI-generated answers grounded in the best-matching
//!   segments
//! - Search the corpus semantically without generating an answer
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration, credentials, and prompt templates
//! - `corpus` - Corpus loading (one segment per line)
//! - `cache` - On-disk embedding cache
//! - `embedding` - Embedding generation
//! - `completion` - Answer generation provider
//! - `retrieval` - Cosine similarity ranking
//! - `qa` - Question answering engine
//!
//! # Example
//!
//! ```rust,no_run
//! use svar::cache::EmbeddingCache;
//! use svar::completion::OpenAICompleter;
//! use svar::config::{Credentials, Prompts, Settings};
//! use svar::embedding::OpenAIEmbedder;
//! use svar::qa::QaEngine;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::from_env()?;
//!
//!     let segments = svar::corpus::load(&settings.corpus_path())?;
//!     let cache = EmbeddingCache::load(&settings.cache_path(), &settings.embedding.model);
//!
//!     let embedder = Arc::new(OpenAIEmbedder::new(
//!         &credentials.openai_api_key,
//!         &settings.embedding.model,
//!         settings.embedding.dimensions as usize,
//!     ));
//!     let completer = Arc::new(OpenAICompleter::new(
//!         credentials.completion_key(),
//!         settings.completion.base_url.as_deref(),
//!         &settings.completion.model,
//!         settings.completion.temperature,
//!     ));
//!
//!     let mut engine = QaEngine::new(
//!         segments,
//!         cache,
//!         settings.cache_path(),
//!         embedder,
//!         completer,
//!         Prompts::default(),
//!         &settings.retrieval,
//!     );
//!     engine.ensure_indexed().await?;
//!
//!     let response = engine.answer("How much has Alphabet dropped?").await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cli;
pub mod completion;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod qa;
pub mod retrieval;

pub use error::{Result, SvarError};
