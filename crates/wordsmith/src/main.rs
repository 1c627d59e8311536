//! Wordsmith - command-line article generation
//!
//! Main entry point for the Wordsmith CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{generate, get};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Wordsmith - generate SEO articles from a target keyword
#[derive(Parser)]
#[command(name = "wordsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// API key used as the bearer token
    #[arg(long, global = true, env = "WORDSMITH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL (default: https://api.wordsmith.ai/)
    #[arg(long, global = true, env = "WORDSMITH_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 60)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start generating an article for a keyword
    Generate(generate::GenerateArgs),

    /// Show an article's status and content
    Get(get::GetArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable) plus rotating JSON file
    let filter = if cli.verbose {
        "wordsmith=debug,wordsmith_client=debug,info"
    } else {
        "wordsmith=info,wordsmith_client=info,warn"
    };

    let log_dir = dirs::data_local_dir()
        .map(|d| d.join("wordsmith").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "wordsmith.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "wordsmith=trace,wordsmith_client=trace,info",
                )),
        )
        .init();

    let ctx = commands::Context {
        api_key: cli.api_key,
        base_url: cli.base_url,
        timeout: std::time::Duration::from_secs(cli.timeout),
        json_output: cli.json,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Generate(args) => generate::run(args, &ctx).await,
        Commands::Get(args) => get::run(args, &ctx).await,
    }
}
