//! CLI module for Svar.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Svar - Corpus Question Answering
///
/// A CLI tool for asking questions against a plain-text corpus, grounded in
/// the most relevant lines via embedding retrieval. The name "Svar" comes
/// from the Norwegian/Scandinavian word for "answer."
#[derive(Parser, Debug)]
#[command(name = "svar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Defaults to the interactive chat loop when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Svar configuration and data directory
    Init,

    /// Embed the corpus and write the embedding cache
    Index {
        /// Discard the existing cache and re-embed everything
        #[arg(short, long)]
        force: bool,
    },

    /// Ask a single question and get an answer from the corpus
    Ask {
        /// The question to ask
        question: String,

        /// Maximum number of context segments to include
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Find the corpus segments most similar to a query
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Minimum similarity score (0.0-1.0)
        #[arg(short, long, default_value = "0.0")]
        min_score: f32,
    },

    /// Start an interactive question loop (the default)
    Chat,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
