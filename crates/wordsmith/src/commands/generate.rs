//! Generate command - start article generation and wait for the result.

use anyhow::Result;
use clap::Args;
use console::Style;

use super::Context;
use super::describe_error;
use super::poll::{self, PollArgs};

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Keyword the article should target
    #[arg(required = true)]
    pub keyword: String,

    /// Project to file the article under
    pub project: Option<String>,

    /// Return right after the request is accepted instead of waiting
    #[arg(long)]
    pub no_wait: bool,

    #[command(flatten)]
    pub poll: PollArgs,
}

/// Run the generate command.
pub async fn run(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let dim = Style::new().dim();

    let response = client
        .generate_article(&args.keyword, args.project.as_deref())
        .await
        .map_err(describe_error)?;

    tracing::info!(
        success = response.success,
        ids = ?response.all_article_ids(),
        "generation requested"
    );

    if !response.success {
        if ctx.json_output {
            super::print_json(&response)?;
        }
        let code = response.error_code.as_deref().unwrap_or("unknown");
        anyhow::bail!("Generation rejected ({}): {}", code, response.message);
    }

    let Some(article_id) = response.first_article_id().map(str::to_string) else {
        if ctx.json_output {
            super::print_json(&response)?;
        }
        anyhow::bail!("Service accepted the request but returned no article ID");
    };

    if args.no_wait {
        if ctx.json_output {
            super::print_json(&response)?;
        } else {
            println!("{}", response.message);
            for id in response.all_article_ids() {
                println!("  {} {}", dim.apply_to("Article:"), id);
            }
            if !response.has_article_ids() {
                println!("  {} {}", dim.apply_to("Article:"), article_id);
            }
        }
        return Ok(());
    }

    if !ctx.json_output {
        println!("{}", response.message);
        println!(
            "{}",
            dim.apply_to(format!("Waiting for article {}...", article_id))
        );
    }

    let outcome = poll::wait_for_article(
        &client,
        &article_id,
        &args.poll,
        poll::progress_printer(ctx.json_output, args.poll.max_attempts),
    )
    .await?;

    poll::finish(outcome, ctx.json_output, ctx.verbose)
}
