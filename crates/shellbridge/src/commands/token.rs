//! Token command - decorate a request with the host's access token.

use anyhow::{Context as _, Result};
use clap::Args;
use shellbridge_auth::{CredentialSupplier, RequestOptions};

use super::{Bridge, Context};

/// Arguments for the token command.
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Ask the host to refresh the token, as on an API retry
    #[arg(long)]
    pub retry: bool,

    /// URL of the API request to decorate
    #[arg(long, default_value = "https://api.example.com/userinfo")]
    pub url: String,
}

/// Run the token command.
pub async fn run(args: TokenArgs, ctx: &Context) -> Result<()> {
    let bridge = Bridge::start(ctx);

    let mut options = RequestOptions::get(args.url);
    let decorated = bridge
        .auth
        .on_call_api(&mut options, args.retry)
        .await
        .context("failed to get access token from host");
    bridge.shutdown().await;
    decorated?;

    if ctx.verbose {
        println!("{} {}", options.method, options.url);
    }
    println!(
        "Authorization: {}",
        options.authorization().unwrap_or_default()
    );
    Ok(())
}
