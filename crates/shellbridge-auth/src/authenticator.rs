//! Authentication contracts consumed by the rest of the application.

use async_trait::async_trait;

use crate::error::Result;
use crate::request::RequestOptions;

/// Login and logout as seen by views.
#[async_trait]
pub trait Authenticator: Send + Sync + std::fmt::Debug {
    /// Start a login.
    async fn login(&self) -> Result<()>;

    /// Start a logout.
    async fn logout(&self) -> Result<()>;

    /// Handle login or logout responses when the page loads.
    ///
    /// Returns `true` if the page load was a login response the caller
    /// should not treat as a normal navigation.
    async fn handle_page_load(&self) -> Result<bool>;

    /// Clean up after a logout has completed.
    async fn on_logged_out(&self) -> Result<()>;

    /// Make the access token act as expired. Testing only.
    async fn expire_access_token(&self) -> Result<()>;

    /// Make the refresh token act as expired. Testing only.
    async fn expire_refresh_token(&self) -> Result<()>;
}

/// Adds credentials to outgoing API requests.
#[async_trait]
pub trait CredentialSupplier: Send + Sync {
    /// Decorate `options` before it is sent.
    ///
    /// The API layer calls this with `is_retry == false` for the first
    /// attempt and once more with `is_retry == true` after an authorization
    /// failure, at which point fresh credentials must be obtained.
    async fn on_call_api(&self, options: &mut RequestOptions, is_retry: bool) -> Result<()>;
}
