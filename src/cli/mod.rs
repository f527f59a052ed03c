//! CLI entry point for the portfolio assistant.

pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Portfolio assistant CLI
#[derive(Parser, Debug)]
#[command(
    name = "portfolio-assistant",
    version,
    about = "Ask the portfolio assistant about projects, skills, and courses"
)]
pub struct Cli {
    /// Gemini model to use (overrides PORTFOLIO_ASSISTANT_MODEL)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Portfolio data file in TOML (overrides PORTFOLIO_DATA)
    #[arg(short, long, global = true)]
    pub portfolio: Option<PathBuf>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long, global = true)]
    pub temperature: Option<f64>,

    /// Max output tokens
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// Print links as plain text instead of terminal hyperlinks
    #[arg(long, global = true)]
    pub no_hyperlinks: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a single question and print the reply
    Ask(AskArgs),
    /// Start an interactive chat session
    Chat,
    /// Print the system context sent to the model
    Prompt,
}

/// Arguments for the `ask` subcommand.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    pub fn text(&self) -> String {
        self.question.join(" ")
    }
}
