//! Integration tests for the mobile authenticator.
//!
//! The native shell is played by the test: calls arrive on a `ChannelHost`
//! queue and are answered through the authenticator's bridge channel.

use std::sync::Arc;

use parking_lot::Mutex;
use shellbridge_auth::{
    AuthError, Authenticator, CredentialSupplier, MobileAuthenticator, RequestOptions,
};
use shellbridge_bridge::{
    BridgeError, BridgeOperation, ChannelHost, DeliveryOutcome, NativeCall, NativeOutcome,
};
use shellbridge_events::{DomainEvent, EventName, EventNotifier, SharedEventNotifier};
use tokio::sync::mpsc::UnboundedReceiver;

struct Harness {
    auth: Arc<MobileAuthenticator>,
    calls: UnboundedReceiver<NativeCall>,
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl Harness {
    fn new() -> Self {
        let (host, calls) = ChannelHost::new();
        let notifier: SharedEventNotifier = EventNotifier::shared();
        let events = Arc::new(Mutex::new(Vec::new()));
        for name in [EventName::MobileLoginComplete, EventName::MobileLogoutComplete] {
            let seen = events.clone();
            notifier.subscribe(name, move |e| seen.lock().push(e.clone()));
        }
        Self {
            auth: Arc::new(MobileAuthenticator::new(Arc::new(host), notifier)),
            calls,
            events,
        }
    }

    async fn next_call(&mut self) -> NativeCall {
        self.calls.recv().await.expect("host queue closed")
    }

    fn answer(&self, call: &NativeCall, outcome: NativeOutcome) -> DeliveryOutcome {
        self.auth.channel().deliver(call.correlation_id, outcome)
    }

    fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().clone()
    }
}

#[tokio::test]
async fn test_login_publishes_one_completion_event() {
    let mut h = Harness::new();

    let login = tokio::spawn({
        let auth = h.auth.clone();
        async move { auth.login().await }
    });

    let call = h.next_call().await;
    assert_eq!(call.operation, BridgeOperation::Login);
    assert!(call.argument.is_none());
    assert!(h.events().is_empty(), "event published before native completion");

    h.answer(&call, NativeOutcome::done());
    login.await.unwrap().unwrap();

    assert_eq!(h.events(), vec![DomainEvent::MobileLoginComplete]);
}

#[tokio::test]
async fn test_logout_publishes_logout_event() {
    let mut h = Harness::new();

    let logout = tokio::spawn({
        let auth = h.auth.clone();
        async move { auth.logout().await }
    });
    let call = h.next_call().await;
    assert_eq!(call.operation, BridgeOperation::Logout);
    h.answer(&call, NativeOutcome::done());
    logout.await.unwrap().unwrap();

    assert_eq!(h.events(), vec![DomainEvent::MobileLogoutComplete]);
}

#[tokio::test]
async fn test_failed_logout_publishes_nothing() {
    let mut h = Harness::new();

    let logout = tokio::spawn({
        let auth = h.auth.clone();
        async move { auth.logout().await }
    });
    let call = h.next_call().await;
    h.answer(&call, NativeOutcome::Failure("user cancelled".into()));

    let err = logout.await.unwrap().unwrap_err();
    assert!(err.is_native_failure());
    assert!(h.events().is_empty());
}

#[tokio::test]
async fn test_first_attempt_uses_current_token() {
    let mut h = Harness::new();

    let api = tokio::spawn({
        let auth = h.auth.clone();
        async move {
            let mut options = RequestOptions::get("https://api.example.com/companies");
            auth.on_call_api(&mut options, false).await.map(|_| options)
        }
    });

    let call = h.next_call().await;
    assert_eq!(call.operation, BridgeOperation::GetAccessToken);
    assert_eq!(call.argument, Some(call.correlation_id.to_string()));
    h.answer(&call, NativeOutcome::Success("tokA".into()));

    let options = api.await.unwrap().unwrap();
    assert_eq!(options.authorization(), Some("Bearer tokA"));
}

#[tokio::test]
async fn test_retry_refreshes_token() {
    let mut h = Harness::new();

    let api = tokio::spawn({
        let auth = h.auth.clone();
        async move {
            let mut options = RequestOptions::get("https://api.example.com/companies")
                .with_header(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_static("Bearer stale"),
                );
            auth.on_call_api(&mut options, true).await.map(|_| options)
        }
    });

    let call = h.next_call().await;
    assert_eq!(call.operation, BridgeOperation::RefreshAccessToken);
    assert_eq!(call.argument, Some(call.correlation_id.to_string()));
    h.answer(&call, NativeOutcome::Success("tokB".into()));

    let options = api.await.unwrap().unwrap();
    assert_eq!(options.authorization(), Some("Bearer tokB"));
}

#[tokio::test]
async fn test_each_token_fetch_gets_fresh_id() {
    let mut h = Harness::new();

    let auth = h.auth.clone();
    let first = tokio::spawn(async move {
        let mut options = RequestOptions::get("https://api.example.com/a");
        auth.on_call_api(&mut options, false).await
    });
    let auth = h.auth.clone();
    let second = tokio::spawn(async move {
        let mut options = RequestOptions::get("https://api.example.com/b");
        auth.on_call_api(&mut options, false).await
    });

    let a = h.next_call().await;
    let b = h.next_call().await;
    assert_ne!(a.correlation_id, b.correlation_id);

    h.answer(&a, NativeOutcome::Success("one".into()));
    h.answer(&b, NativeOutcome::Success("two".into()));
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let mut h = Harness::new();

    let api = tokio::spawn({
        let auth = h.auth.clone();
        async move {
            let mut options = RequestOptions::get("https://api.example.com/companies");
            let result = auth.on_call_api(&mut options, false).await;
            (result, options)
        }
    });
    let call = h.next_call().await;
    h.answer(&call, NativeOutcome::Success("bad\ntoken".into()));

    let (result, options) = api.await.unwrap();
    assert!(matches!(
        result,
        Err(AuthError::InvalidToken {
            operation: BridgeOperation::GetAccessToken
        })
    ));
    assert!(options.authorization().is_none());
}

#[tokio::test]
async fn test_concurrent_expiry_calls_resolve_independently() {
    let mut h = Harness::new();

    let access = tokio::spawn({
        let auth = h.auth.clone();
        async move { auth.expire_access_token().await }
    });
    let refresh = tokio::spawn({
        let auth = h.auth.clone();
        async move { auth.expire_refresh_token().await }
    });

    let first = h.next_call().await;
    let second = h.next_call().await;
    let (access_call, refresh_call) = if first.operation == BridgeOperation::ExpireAccessToken {
        (first, second)
    } else {
        (second, first)
    };
    assert_eq!(refresh_call.operation, BridgeOperation::ExpireRefreshToken);

    // Fail only the refresh expiry; the access expiry must still succeed.
    h.answer(&refresh_call, NativeOutcome::Failure("no refresh token".into()));
    h.answer(&access_call, NativeOutcome::done());

    access.await.unwrap().unwrap();
    let err = refresh.await.unwrap().unwrap_err();
    assert!(matches!(
        err,
        AuthError::Bridge(BridgeError::NativeOperationFailed {
            operation: BridgeOperation::ExpireRefreshToken,
            ..
        })
    ));
    assert!(h.events().is_empty());
}

#[tokio::test]
async fn test_overlapping_logins_are_not_merged() {
    let mut h = Harness::new();

    let first = tokio::spawn({
        let auth = h.auth.clone();
        async move { auth.login().await }
    });
    let second = tokio::spawn({
        let auth = h.auth.clone();
        async move { auth.login().await }
    });

    let a = h.next_call().await;
    let b = h.next_call().await;
    assert_ne!(a.correlation_id, b.correlation_id);
    h.answer(&a, NativeOutcome::done());
    h.answer(&b, NativeOutcome::done());
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    assert_eq!(
        h.events(),
        vec![
            DomainEvent::MobileLoginComplete,
            DomainEvent::MobileLoginComplete
        ]
    );
}

#[tokio::test]
async fn test_handle_page_load_makes_no_call() {
    let mut h = Harness::new();

    assert!(!h.auth.handle_page_load().await.unwrap());
    assert!(h.calls.try_recv().is_err());
}
