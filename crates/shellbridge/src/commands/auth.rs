//! Login, logout and token expiry commands.

use anyhow::{Context as _, Result};
use shellbridge_auth::{Authenticator, MobileAuthenticator};

use super::{Bridge, Context};

/// Host operation to run.
#[derive(Debug, Clone, Copy)]
pub enum AuthAction {
    Login,
    Logout,
    ExpireAccess,
    ExpireRefresh,
}

/// Run an auth command.
pub async fn run(action: AuthAction, ctx: &Context) -> Result<()> {
    let bridge = Bridge::start(ctx);
    let result = perform(action, &bridge.auth).await;
    bridge.shutdown().await;
    result
}

async fn perform(action: AuthAction, auth: &MobileAuthenticator) -> Result<()> {
    match action {
        AuthAction::Login => {
            auth.login().await.context("login failed")?;
            println!("Login complete");
        }
        AuthAction::Logout => {
            auth.logout().await.context("logout failed")?;
            auth.on_logged_out().await?;
            println!("Logout complete");
        }
        AuthAction::ExpireAccess => {
            auth.expire_access_token()
                .await
                .context("failed to expire access token")?;
            println!("Access token expired");
        }
        AuthAction::ExpireRefresh => {
            auth.expire_refresh_token()
                .await
                .context("failed to expire refresh token")?;
            println!("Refresh token expired");
        }
    }
    Ok(())
}
