//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command: answer a single question and exit.
pub async fn run_ask(question: &str, top_k: Option<usize>, mut settings: Settings) -> Result<()> {
    let credentials = match preflight::check(Operation::Ask) {
        Ok(credentials) => credentials,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    if let Some(top_k) = top_k {
        settings.retrieval.top_k = top_k;
    }

    let mut engine = super::build_engine(&settings, &credentials, false)?;

    let spinner = Output::spinner("Searching corpus...");
    engine.ensure_indexed().await?;

    match engine.answer(question).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.answer);

            if !response.sources.is_empty() {
                Output::header("Sources");
                for source in &response.sources {
                    Output::scored_segment(source.index, source.score, &source.text);
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
