//! CLI command handlers.

pub mod generate;
pub mod get;
pub mod poll;

use std::time::Duration;

use anyhow::{Context as _, Result};
use console::Style;
use wordsmith_client::{Article, Error, WordsmithClient};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// API key, from `--api-key` or `WORDSMITH_API_KEY`.
    pub api_key: Option<String>,
    /// Base URL override.
    pub base_url: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build a client from the global options.
    pub fn client(&self) -> Result<WordsmithClient> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .context("No API key provided. Set WORDSMITH_API_KEY or pass --api-key")?;

        let mut builder = WordsmithClient::builder()
            .api_key(api_key)
            .timeout(self.timeout);
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url);
        }

        let client = builder.build().map_err(describe_error)?;
        tracing::debug!(base_url = %client.base_url(), "client ready");
        Ok(client)
    }
}

/// Convert a client error into a CLI-facing error that names its kind.
pub fn describe_error(err: Error) -> anyhow::Error {
    let mut line = format!("[{}] {}", err.kind(), err);
    if let Some(status) = err.status_code() {
        line.push_str(&format!(" (HTTP {})", status));
    }
    if let Some(wait) = err.retry_after() {
        line.push_str(&format!(" - retry after {:.1}s", wait.as_secs_f64()));
    }
    anyhow::Error::new(err).context(line)
}

/// Print an article for humans.
pub fn print_article(article: &Article, verbose: bool) {
    let dim = Style::new().dim();
    let bold = Style::new().bold();

    println!();
    println!(
        "{}",
        bold.apply_to(article.title.as_deref().unwrap_or("(untitled)"))
    );
    println!("{}", dim.apply_to("─".repeat(40)));
    println!("  {} {}", dim.apply_to("ID:"), article.id);
    println!("  {} {}", dim.apply_to("Status:"), status_style(article).apply_to(&article.status));
    println!("  {} {}%", dim.apply_to("Progress:"), article.progress);
    println!("  {} {}", dim.apply_to("Keyword:"), article.target_keyword);
    if let Some(project) = &article.project_name {
        println!("  {} {}", dim.apply_to("Project:"), project);
    }
    if verbose {
        if let Some(created) = article.created_at {
            println!("  {} {}", dim.apply_to("Created:"), created.to_rfc3339());
        }
        if let Some(updated) = article.updated_at {
            println!("  {} {}", dim.apply_to("Updated:"), updated.to_rfc3339());
        }
    }

    if let Some(content) = &article.content {
        println!();
        println!("{}", content);
    }
    println!();
}

fn status_style(article: &Article) -> Style {
    if article.is_completed() {
        Style::new().green()
    } else if article.has_failed() {
        Style::new().red()
    } else {
        Style::new().yellow()
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
