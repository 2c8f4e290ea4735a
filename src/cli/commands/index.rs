//! Index command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the index command: embed the corpus and flush the cache.
pub async fn run_index(force: bool, settings: Settings) -> Result<()> {
    let credentials = match preflight::check(Operation::Index) {
        Ok(credentials) => credentials,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let mut engine = super::build_engine(&settings, &credentials, force)?;

    if engine.segment_count() == 0 {
        Output::warning(&format!(
            "Corpus {} has no segments; nothing to index.",
            settings.corpus_path().display()
        ));
        return Ok(());
    }

    let spinner = Output::spinner(&format!(
        "Embedding {} segments...",
        engine.segment_count()
    ));
    let report = engine.ensure_indexed().await?;
    spinner.finish_and_clear();

    Output::success(&format!(
        "Indexed {} segments ({} newly embedded, {} reused from cache).",
        engine.segment_count(),
        report.embedded,
        report.reused
    ));
    Output::kv("cache", &settings.cache_path().display().to_string());

    Ok(())
}
