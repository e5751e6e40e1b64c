//! cellchat CLI — the main entry point.
//!
//! Commands:
//! - `context` — Build the chat context from a session history file
//! - `config`  — Show, locate or validate configuration
//! - `tokens`  — List the effective ignore tokens

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "cellchat",
    about = "cellchat — chat context from notebook session history",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of ~/.cellchat/config.toml
    #[arg(long, global = true, env = "CELLCHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the chat context from a session history file
    Context {
        /// JSON history file (`{"inputs": ..., "outputs": ...}`)
        #[arg(long)]
        history: PathBuf,

        /// Maximum number of inputs to include
        #[arg(short, long)]
        num_messages: Option<usize>,

        /// Seed for table/series sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Render every output with its generic representation
        #[arg(long)]
        plain: bool,

        /// Print compact JSON instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List the effective ignore tokens
    Tokens,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Validate the configuration
    Validate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing on stderr; stdout carries the context JSON.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config;
    match cli.command {
        Commands::Context {
            history,
            num_messages,
            seed,
            plain,
            compact,
        } => commands::context::run(
            config_path.as_deref(),
            commands::context::ContextArgs {
                history,
                num_messages,
                seed,
                plain,
                compact,
            },
        )?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path.as_deref())?,
            ConfigAction::Path => commands::config_cmd::path(config_path.as_deref())?,
            ConfigAction::Validate => commands::config_cmd::validate(config_path.as_deref())?,
        },
        Commands::Tokens => commands::tokens::run(config_path.as_deref())?,
    }

    Ok(())
}
