//! Authenticator for a front-end running inside a native mobile shell.
//!
//! Tokens never live on the web side: every API call asks the host for its
//! current access token, and a retry asks the host to refresh it first.
//! Token freshness is the host's concern, so this type holds no token state.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{self, HeaderValue};
use shellbridge_bridge::{BridgeChannel, BridgeOperation, NativeHost};
use shellbridge_events::{DomainEvent, SharedEventNotifier};

use crate::authenticator::{Authenticator, CredentialSupplier};
use crate::error::{AuthError, Result};
use crate::request::RequestOptions;

/// Authenticator that delegates login, logout and tokens to the native host.
#[derive(Debug, Clone)]
pub struct MobileAuthenticator {
    channel: Arc<BridgeChannel>,
    events: SharedEventNotifier,
}

impl MobileAuthenticator {
    /// Create an authenticator that talks to `host`.
    pub fn new(host: Arc<dyn NativeHost>, events: SharedEventNotifier) -> Self {
        Self::with_channel(Arc::new(BridgeChannel::new(host)), events)
    }

    /// Create an authenticator over an existing channel.
    ///
    /// The caller keeps a clone of the channel to route host deliveries to it.
    pub fn with_channel(channel: Arc<BridgeChannel>, events: SharedEventNotifier) -> Self {
        Self { channel, events }
    }

    /// The channel host deliveries must be routed to.
    pub fn channel(&self) -> &Arc<BridgeChannel> {
        &self.channel
    }
}

#[async_trait]
impl Authenticator for MobileAuthenticator {
    /// The host runs its own login UI (an in-app browser), so the page is not
    /// redirected and views must be told to reload their data afterwards.
    async fn login(&self) -> Result<()> {
        self.channel.invoke(BridgeOperation::Login).await?;
        tracing::info!("mobile login completed");
        self.events.publish(DomainEvent::MobileLoginComplete);
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.channel.invoke(BridgeOperation::Logout).await?;
        tracing::info!("mobile logout completed");
        self.events.publish(DomainEvent::MobileLogoutComplete);
        Ok(())
    }

    // No redirect responses reach the page inside a mobile shell.
    async fn handle_page_load(&self) -> Result<bool> {
        Ok(false)
    }

    async fn on_logged_out(&self) -> Result<()> {
        Ok(())
    }

    async fn expire_access_token(&self) -> Result<()> {
        self.channel.invoke(BridgeOperation::ExpireAccessToken).await?;
        Ok(())
    }

    async fn expire_refresh_token(&self) -> Result<()> {
        self.channel
            .invoke(BridgeOperation::ExpireRefreshToken)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialSupplier for MobileAuthenticator {
    async fn on_call_api(&self, options: &mut RequestOptions, is_retry: bool) -> Result<()> {
        let operation = if is_retry {
            BridgeOperation::RefreshAccessToken
        } else {
            BridgeOperation::GetAccessToken
        };

        let token = self.channel.invoke(operation).await?;

        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| AuthError::InvalidToken { operation })?;
        value.set_sensitive(true);
        options.headers.insert(header::AUTHORIZATION, value);

        tracing::debug!(operation = %operation, url = %options.url, "authorization header set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellbridge_bridge::{BridgeError, HostError, NativeCall, UnavailableHost};
    use shellbridge_events::{EventName, EventNotifier};

    /// Host that records calls and answers nothing.
    #[derive(Debug, Default)]
    struct RecordingHost {
        calls: parking_lot::Mutex<Vec<NativeCall>>,
    }

    impl NativeHost for RecordingHost {
        fn invoke(&self, call: &NativeCall) -> std::result::Result<(), HostError> {
            self.calls.lock().push(call.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_handle_page_load_is_false_without_bridge_call() {
        let host = Arc::new(RecordingHost::default());
        let auth = MobileAuthenticator::new(host.clone(), EventNotifier::shared());

        assert!(!auth.handle_page_load().await.unwrap());
        auth.on_logged_out().await.unwrap();
        assert!(host.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_login_unavailable_publishes_nothing() {
        let events = EventNotifier::shared();
        let published = Arc::new(parking_lot::Mutex::new(0usize));
        let p = published.clone();
        events.subscribe(EventName::MobileLoginComplete, move |_| *p.lock() += 1);

        let auth = MobileAuthenticator::new(Arc::new(UnavailableHost), events);
        let err = auth.login().await.unwrap_err();

        assert!(matches!(
            err,
            AuthError::Bridge(BridgeError::BridgeUnavailable { .. })
        ));
        assert!(!err.is_native_failure());
        assert_eq!(*published.lock(), 0);
    }

    #[tokio::test]
    async fn test_token_unavailable_leaves_headers() {
        let auth = MobileAuthenticator::new(Arc::new(UnavailableHost), EventNotifier::shared());
        let mut options = RequestOptions::get("https://api.example.com/userinfo");

        assert!(auth.on_call_api(&mut options, false).await.is_err());
        assert!(options.authorization().is_none());
    }
}
