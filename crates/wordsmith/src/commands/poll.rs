//! Caller-side polling of an article until generation settles.
//!
//! The client never polls on its own; this loop lives in the CLI.

use std::time::Duration;

use anyhow::{Result, bail};
use clap::Args;
use console::Style;
use wordsmith_client::{Article, WordsmithClient};

use super::describe_error;

/// Default delay between status checks.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Default number of status checks before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// Polling options shared by commands that wait on an article.
#[derive(Args, Debug, Clone)]
pub struct PollArgs {
    /// Seconds between status checks
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: u64,

    /// Maximum number of status checks
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,
}

/// How a polling run ended.
#[derive(Debug)]
pub enum PollOutcome {
    /// The article finished generating.
    Completed(Article),
    /// The service reported a failure.
    Failed(Article),
    /// Attempts ran out while the article was still in progress.
    TimedOut {
        attempts: u32,
        last: Article,
    },
}

/// Poll `id` until it completes, fails, or `args.max_attempts` checks pass.
///
/// `on_update` sees every intermediate article so callers can report progress.
pub async fn wait_for_article(
    client: &WordsmithClient,
    id: &str,
    args: &PollArgs,
    mut on_update: impl FnMut(u32, &Article),
) -> Result<PollOutcome> {
    let interval = Duration::from_secs(args.interval);
    let mut attempt = 0;

    loop {
        attempt += 1;

        let response = client.get_article(id).await.map_err(describe_error)?;
        let Some(article) = response.article else {
            bail!("Article '{}' not found", id);
        };

        tracing::debug!(
            attempt,
            status = %article.status,
            progress = article.progress,
            "polled article"
        );

        if article.is_completed() {
            return Ok(PollOutcome::Completed(article));
        }
        if article.has_failed() {
            return Ok(PollOutcome::Failed(article));
        }

        // Unknown statuses are treated as still in progress.
        on_update(attempt, &article);

        if attempt >= args.max_attempts {
            return Ok(PollOutcome::TimedOut {
                attempts: attempt,
                last: article,
            });
        }

        tokio::time::sleep(interval).await;
    }
}

/// Report a finished polling run, failing the command unless it completed.
pub fn finish(outcome: PollOutcome, json_output: bool, verbose: bool) -> Result<()> {
    match outcome {
        PollOutcome::Completed(article) => {
            if json_output {
                super::print_json(&article)?;
            } else {
                super::print_article(&article, verbose);
            }
            Ok(())
        }
        PollOutcome::Failed(article) => {
            if json_output {
                super::print_json(&article)?;
            }
            bail!("Article '{}' failed to generate", article.id)
        }
        PollOutcome::TimedOut { attempts, last } => {
            if json_output {
                super::print_json(&last)?;
            }
            bail!(
                "Article '{}' still {} ({}%) after {} checks",
                last.id,
                last.status,
                last.progress,
                attempts
            )
        }
    }
}

/// Progress callback that prints one dim line per check.
pub fn progress_printer(json_output: bool, max_attempts: u32) -> impl FnMut(u32, &Article) {
    let dim = Style::new().dim();
    move |attempt, article| {
        if !json_output {
            println!(
                "{}",
                dim.apply_to(format!(
                    "[{}/{}] {} ({}%)",
                    attempt, max_attempts, article.status, article.progress
                ))
            );
        }
    }
}
