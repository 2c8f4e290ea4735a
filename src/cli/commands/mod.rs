//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod index;
mod init;
mod search;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use index::run_index;
pub use init::run_init;
pub use search::run_search;

use crate::cache::EmbeddingCache;
use crate::completion::OpenAICompleter;
use crate::config::{Credentials, Prompts, Settings};
use crate::corpus;
use crate::embedding::OpenAIEmbedder;
use crate::error::Result;
use crate::qa::QaEngine;
use std::sync::Arc;

/// Assemble a question answering engine from settings and credentials.
///
/// Loads the corpus (fatal when missing) and the embedding cache (empty when
/// absent or when `force_reindex` is set), and wires up the providers.
pub(crate) fn build_engine(
    settings: &Settings,
    credentials: &Credentials,
    force_reindex: bool,
) -> Result<QaEngine> {
    let segments = corpus::load(&settings.corpus_path())?;

    let cache_path = settings.cache_path();
    let cache = if force_reindex {
        EmbeddingCache::new(&settings.embedding.model)
    } else {
        EmbeddingCache::load(&cache_path, &settings.embedding.model)
    };

    let embedder = Arc::new(OpenAIEmbedder::new(
        &credentials.openai_api_key,
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
    ));

    let completer = Arc::new(OpenAICompleter::new(
        credentials.completion_key(),
        settings.completion.base_url.as_deref(),
        &settings.completion.model,
        settings.completion.temperature,
    ));

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    Ok(QaEngine::new(
        segments,
        cache,
        cache_path,
        embedder,
        completer,
        prompts,
        &settings.retrieval,
    ))
}
