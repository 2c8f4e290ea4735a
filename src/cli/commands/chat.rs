//! Interactive question loop.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, BufRead, Write};

/// Check whether an input line is the session sentinel.
///
/// "quit" terminates the session, case-insensitively; "exit" is accepted as
/// an alias.
fn is_sentinel(input: &str) -> bool {
    input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit")
}

/// Run the interactive chat loop.
///
/// Each question is answered independently; no conversation state is carried
/// between turns. Per-turn provider errors are reported and the loop
/// continues.
pub async fn run_chat(settings: Settings) -> anyhow::Result<()> {
    let credentials = match preflight::check(Operation::Ask) {
        Ok(credentials) => credentials,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let mut engine = super::build_engine(&settings, &credentials, false)?;

    let spinner = Output::spinner("Preparing corpus embeddings...");
    let report = engine.ensure_indexed().await?;
    spinner.finish_and_clear();

    if engine.segment_count() == 0 {
        Output::warning("The corpus is empty; answers will have no grounding.");
    } else if report.embedded > 0 {
        Output::info(&format!(
            "Embedded {} new segments ({} reused from cache).",
            report.embedded, report.reused
        ));
    }

    println!("\n{}", style("Svar").bold().cyan());
    println!(
        "{}\n",
        style("Ask questions about your corpus. Type 'quit' to exit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        let bytes_read = stdin.lock().read_line(&mut input)?;
        if bytes_read == 0 {
            // EOF terminates the session like the sentinel does.
            println!();
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if is_sentinel(input) {
            Output::info("Goodbye!");
            break;
        }

        let spinner = Output::spinner("Finding answer...");
        match engine.answer(input).await {
            Ok(response) => {
                spinner.finish_and_clear();
                println!(
                    "\n{} {}\n",
                    style("Svar:").cyan().bold(),
                    response.answer
                );
            }
            Err(e) => {
                spinner.finish_and_clear();
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
