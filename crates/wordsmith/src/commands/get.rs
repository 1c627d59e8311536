//! Get command - show an article, optionally waiting for it to finish.

use anyhow::{Result, bail};
use clap::Args;

use super::Context;
use super::describe_error;
use super::poll::{self, PollArgs};

/// Arguments for the get command.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Article ID
    pub id: String,

    /// Keep checking until the article completes or fails
    #[arg(short, long)]
    pub wait: bool,

    #[command(flatten)]
    pub poll: PollArgs,
}

/// Run the get command.
pub async fn run(args: GetArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    if args.wait {
        let outcome = poll::wait_for_article(
            &client,
            &args.id,
            &args.poll,
            poll::progress_printer(ctx.json_output, args.poll.max_attempts),
        )
        .await?;
        return poll::finish(outcome, ctx.json_output, ctx.verbose);
    }

    let response = client.get_article(&args.id).await.map_err(describe_error)?;

    if ctx.json_output {
        return super::print_json(&response);
    }

    match response.article {
        Some(article) => {
            super::print_article(&article, ctx.verbose);
            Ok(())
        }
        None => bail!("Article '{}' not found", args.id),
    }
}
