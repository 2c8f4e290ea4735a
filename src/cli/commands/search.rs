//! Search command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the search command: print ranked segments without generating an
/// answer.
pub async fn run_search(
    query: &str,
    limit: usize,
    min_score: f32,
    settings: Settings,
) -> Result<()> {
    let credentials = match preflight::check(Operation::Search) {
        Ok(credentials) => credentials,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let mut engine = super::build_engine(&settings, &credentials, false)?;

    let spinner = Output::spinner("Searching...");
    engine.ensure_indexed().await?;

    let results = engine.search_with(query, limit, min_score).await;
    spinner.finish_and_clear();

    match results {
        Ok(segments) => {
            if segments.is_empty() {
                Output::warning("No results found matching your query.");
            } else {
                Output::success(&format!("Found {} results", segments.len()));

                for segment in &segments {
                    Output::scored_segment(segment.index, segment.score, &segment.text);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(anyhow::anyhow!("{}", e));
        }
    }

    Ok(())
}
