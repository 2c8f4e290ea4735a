//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Svar Setup");
    println!();

    // Step 1: API key
    println!("{}", style("Step 1: Checking API configuration").bold().cyan());
    println!();

    if std::env::var("OPENAI_API_KEY").map_or(true, |key| key.is_empty()) {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!();
        println!("  Svar requires an OpenAI API key for embeddings.");
        println!(
            "  Get your API key from: {}",
            style("https://platform.openai.com/api-keys").underlined()
        );
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
    } else {
        Output::success("OpenAI API key is configured!");
    }

    println!();

    // Step 2: Data directory
    println!("{}", style("Step 2: Setting up directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    }

    println!();

    // Step 3: Config file
    println!("{}", style("Step 3: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
    }

    println!();

    // Step 4: Corpus
    println!("{}", style("Step 4: Corpus file").bold().cyan());
    println!();

    let corpus_path = settings.corpus_path();
    if corpus_path.exists() {
        Output::success(&format!("Corpus file found: {}", corpus_path.display()));
    } else {
        Output::warning(&format!(
            "No corpus file at {}. Create it with one text segment per line.",
            corpus_path.display()
        ));
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Embed your corpus", style("svar index").cyan());
    println!(
        "  {} Ask a one-off question",
        style("svar ask \"<question>\"").cyan()
    );
    println!("  {} Start an interactive session", style("svar chat").cyan());
    println!();
    println!("For more help: {}", style("svar --help").cyan());

    Ok(())
}
