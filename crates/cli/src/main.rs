//! Prompt Playground CLI — the main entry point.
//!
//! Commands:
//! - `chat`     — Interactive chat (or a single message) with the assistant
//! - `compose`  — Print the composed system prompt without contacting the service
//! - `models`   — List the models the selector offers
//! - `onboard`  — Write a default config file
//! - `doctor`   — Check config, credentials and attachments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;
mod repl;

#[derive(Parser)]
#[command(
    name = "playground",
    about = "Prompt Playground — chat with a remote assistant over your own documents",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Inputs that shape the system prompt.
#[derive(Args, Debug, Clone, Default)]
pub struct PromptArgs {
    /// Base system prompt
    #[arg(short = 's', long, conflicts_with = "system_prompt_file")]
    pub system_prompt: Option<String>,

    /// Read the base system prompt from a file
    #[arg(long, value_name = "PATH")]
    pub system_prompt_file: Option<PathBuf>,

    /// Attach a file (.txt .csv .json .xlsx .xls .pdf); repeatable
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        #[command(flatten)]
        prompt: PromptArgs,

        /// Model to use (see `playground models`)
        #[arg(short, long)]
        model: Option<String>,

        /// API key (overrides config and environment)
        #[arg(long)]
        api_key: Option<String>,

        /// Send a single message instead of entering interactive mode
        #[arg(long)]
        message: Option<String>,
    },

    /// Print the composed system prompt
    Compose {
        #[command(flatten)]
        prompt: PromptArgs,
    },

    /// List supported models
    Models,

    /// Write a default configuration file
    Onboard,

    /// Diagnose configuration and credentials
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr and stay quiet by default so they don't interleave with the chat.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat {
            prompt,
            model,
            api_key,
            message,
        } => commands::chat::run(prompt, model, api_key, message).await?,
        Commands::Compose { prompt } => commands::compose::run(prompt).await?,
        Commands::Models => commands::models::run().await?,
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
