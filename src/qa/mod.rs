//! Question answering over the corpus.
//!
//! Ties together the corpus, the embedding cache, similarity ranking, and the
//! completion provider.

mod engine;

pub use engine::{IndexReport, QaEngine, QaResponse};

use crate::retrieval::ScoredSegment;

/// Format ranked segments for inclusion in a prompt.
///
/// Segments are included verbatim, separated by blank lines, best match
/// first.
pub fn format_context_for_prompt(segments: &[ScoredSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
