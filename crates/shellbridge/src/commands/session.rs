//! Session command - a full login, API call, retry and logout cycle.

use anyhow::{Context as _, Result};
use clap::Args;
use shellbridge_auth::{Authenticator, CredentialSupplier, MobileAuthenticator, RequestOptions};

use super::{Bridge, Context};

/// Arguments for the session command.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// URL of the API request to decorate
    #[arg(long, default_value = "https://api.example.com/companies")]
    pub url: String,
}

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let bridge = Bridge::start(ctx);
    let result = cycle(&args.url, &bridge.auth).await;
    bridge.shutdown().await;
    result
}

async fn cycle(url: &str, auth: &MobileAuthenticator) -> Result<()> {
    if auth.handle_page_load().await? {
        println!("page load handled a login response");
    }

    auth.login().await.context("login failed")?;

    let mut options = RequestOptions::get(url);
    auth.on_call_api(&mut options, false)
        .await
        .context("failed to get access token")?;
    println!("first attempt: {}", options.authorization().unwrap_or_default());

    // Simulate the API rejecting the token so the caller retries once.
    auth.expire_access_token().await?;
    let mut options = RequestOptions::get(url);
    auth.on_call_api(&mut options, false).await?;
    println!("after expiry: {}", options.authorization().unwrap_or_default());

    auth.on_call_api(&mut options, true)
        .await
        .context("failed to refresh access token")?;
    println!("retry: {}", options.authorization().unwrap_or_default());

    auth.logout().await.context("logout failed")?;
    auth.on_logged_out().await?;

    tracing::debug!(
        pending = auth.channel().pending_count(),
        "session finished"
    );
    Ok(())
}
