//! Answer generation via an external completion provider.

mod openai;

pub use openai::OpenAICompleter;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for completion providers.
///
/// The provider contract is a single blocking round trip: given a system and
/// user prompt, return the generated text.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Generate a completion for the given prompts.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// The model this completer generates with.
    fn model(&self) -> &str;
}
