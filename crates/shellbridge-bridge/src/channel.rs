//! Request/response correlation over the native bridge.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::host::NativeHost;
use crate::operation::{BridgeOperation, CorrelationId};
use crate::protocol::{NativeCall, NativeOutcome, NativeResponse};

/// What happened to a delivery handed to the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The matching pending invocation was resolved.
    Resolved,
    /// No invocation was waiting on this id; the delivery was dropped.
    Stale,
}

/// A native call awaiting its delivery.
struct PendingInvocation {
    operation: BridgeOperation,
    sender: oneshot::Sender<NativeOutcome>,
}

type PendingMap = Mutex<HashMap<CorrelationId, PendingInvocation>>;

/// Removes a pending entry when the awaiting call finishes or is dropped.
struct PendingGuard<'a> {
    pending: &'a PendingMap,
    id: CorrelationId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.pending.lock().remove(&self.id).is_some() {
            tracing::debug!(correlation_id = %self.id, "pending invocation released without delivery");
        }
    }
}

/// Turns fire-and-forget native operations into awaitable calls.
///
/// Every [`invoke`](Self::invoke) registers a pending invocation under a
/// fresh [`CorrelationId`] before the host sees the call, so a host that
/// answers synchronously from inside `NativeHost::invoke` is still matched.
/// The `deliver*` entry points may be called from any thread.
pub struct BridgeChannel {
    host: Arc<dyn NativeHost>,
    pending: PendingMap,
    timeout: Option<Duration>,
}

impl BridgeChannel {
    /// Create a channel with no invocation timeout.
    pub fn new(host: Arc<dyn NativeHost>) -> Self {
        Self {
            host,
            pending: Mutex::new(HashMap::new()),
            timeout: None,
        }
    }

    /// Create a channel from configuration.
    pub fn with_config(host: Arc<dyn NativeHost>, config: &BridgeConfig) -> Self {
        Self {
            timeout: config.invoke_timeout(),
            ..Self::new(host)
        }
    }

    /// Fail calls that get no delivery within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run `operation` on the native host and wait for its delivery.
    ///
    /// Resolves to the delivered string (empty for operations without a
    /// value). Dropping the returned future releases the pending entry.
    pub async fn invoke(&self, operation: BridgeOperation) -> Result<String> {
        let correlation_id = CorrelationId::new();
        let (tx, rx) = oneshot::channel();

        self.pending.lock().insert(
            correlation_id,
            PendingInvocation {
                operation,
                sender: tx,
            },
        );
        let _guard = PendingGuard {
            pending: &self.pending,
            id: correlation_id,
        };

        tracing::debug!(
            operation = %operation,
            correlation_id = %correlation_id,
            "invoking native operation"
        );

        let call = NativeCall::new(operation, correlation_id);
        if let Err(e) = self.host.invoke(&call) {
            tracing::warn!(
                operation = %operation,
                error = %e,
                "native bridge unavailable"
            );
            return Err(BridgeError::BridgeUnavailable {
                operation,
                reason: e.to_string(),
            });
        }

        let received = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, rx).await {
                Ok(received) => received,
                Err(_) => {
                    tracing::warn!(
                        operation = %operation,
                        correlation_id = %correlation_id,
                        timeout_ms = limit.as_millis() as u64,
                        "native operation timed out"
                    );
                    return Err(BridgeError::Timeout {
                        operation,
                        correlation_id,
                        elapsed: limit,
                    });
                }
            },
            None => rx.await,
        };

        match received {
            Ok(NativeOutcome::Success(value)) => {
                tracing::debug!(
                    operation = %operation,
                    correlation_id = %correlation_id,
                    "native operation completed"
                );
                Ok(value)
            }
            Ok(NativeOutcome::Failure(message)) => {
                tracing::debug!(
                    operation = %operation,
                    correlation_id = %correlation_id,
                    error = %message,
                    "native operation failed"
                );
                Err(BridgeError::NativeOperationFailed { operation, message })
            }
            Err(_) => Err(BridgeError::Abandoned { operation }),
        }
    }

    /// Resolve the invocation waiting on `correlation_id`.
    ///
    /// Unknown or already resolved ids are logged and ignored.
    pub fn deliver(&self, correlation_id: CorrelationId, outcome: NativeOutcome) -> DeliveryOutcome {
        let Some(pending) = self.pending.lock().remove(&correlation_id) else {
            tracing::warn!(correlation_id = %correlation_id, "ignoring stale native delivery");
            return DeliveryOutcome::Stale;
        };

        if pending.sender.send(outcome).is_err() {
            tracing::debug!(
                operation = %pending.operation,
                correlation_id = %correlation_id,
                "caller stopped waiting before delivery"
            );
            return DeliveryOutcome::Stale;
        }
        DeliveryOutcome::Resolved
    }

    /// String-keyed entry point for hosts that call back with raw values.
    ///
    /// A present `error` marks the call as failed.
    pub fn deliver_raw(
        &self,
        correlation_id: &str,
        result: Option<&str>,
        error: Option<&str>,
    ) -> DeliveryOutcome {
        let response = NativeResponse {
            correlation_id: correlation_id.to_string(),
            result: result.map(str::to_string),
            error: error.map(str::to_string),
        };
        self.deliver_response(response)
    }

    /// Entry point for hosts that post JSON [`NativeResponse`] messages.
    pub fn deliver_json(&self, message: &str) -> Result<DeliveryOutcome> {
        let response: NativeResponse = serde_json::from_str(message)?;
        Ok(self.deliver_response(response))
    }

    /// Resolve using a parsed [`NativeResponse`].
    pub fn deliver_response(&self, response: NativeResponse) -> DeliveryOutcome {
        match response.correlation_id.parse::<CorrelationId>() {
            Ok(id) => self.deliver(id, response.into_outcome()),
            Err(_) => {
                tracing::warn!(
                    correlation_id = %response.correlation_id,
                    "ignoring native delivery with malformed correlation id"
                );
                DeliveryOutcome::Stale
            }
        }
    }

    /// Fail every pending invocation with [`BridgeError::Abandoned`].
    ///
    /// Used when the host goes away and no further deliveries will arrive.
    pub fn abandon_all(&self) -> usize {
        let drained: Vec<_> = self.pending.lock().drain().collect();
        if !drained.is_empty() {
            tracing::info!(count = drained.len(), "abandoning pending native invocations");
        }
        drained.len()
    }

    /// Number of invocations awaiting delivery.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether `correlation_id` is awaiting delivery.
    pub fn is_pending(&self, correlation_id: &CorrelationId) -> bool {
        self.pending.lock().contains_key(correlation_id)
    }

    /// Operation of every pending invocation, keyed by id.
    pub fn pending_operations(&self) -> Vec<(CorrelationId, BridgeOperation)> {
        self.pending
            .lock()
            .iter()
            .map(|(id, p)| (*id, p.operation))
            .collect()
    }
}

impl std::fmt::Debug for BridgeChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeChannel")
            .field("host", &self.host)
            .field("pending", &self.pending_count())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ChannelHost, HostError, UnavailableHost};

    /// Host that answers synchronously from inside `invoke`.
    #[derive(Debug)]
    struct EagerHost {
        channel: parking_lot::Mutex<Option<std::sync::Weak<BridgeChannel>>>,
    }

    impl NativeHost for EagerHost {
        fn invoke(&self, call: &NativeCall) -> std::result::Result<(), HostError> {
            let channel = self
                .channel
                .lock()
                .as_ref()
                .and_then(|w| w.upgrade())
                .ok_or_else(|| HostError::new("not wired"))?;
            channel.deliver(
                call.correlation_id,
                NativeOutcome::Success(format!("eager-{}", call.operation)),
            );
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_delivery_before_invoke_returns() {
        let host = Arc::new(EagerHost {
            channel: parking_lot::Mutex::new(None),
        });
        let channel = Arc::new(BridgeChannel::new(host.clone()));
        *host.channel.lock() = Some(Arc::downgrade(&channel));

        let value = channel.invoke(BridgeOperation::GetAccessToken).await.unwrap();
        assert_eq!(value, "eager-getAccessToken");
        assert_eq!(channel.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_host() {
        let channel = BridgeChannel::new(Arc::new(UnavailableHost));
        let err = channel.invoke(BridgeOperation::Login).await.unwrap_err();
        assert!(matches!(
            err,
            BridgeError::BridgeUnavailable {
                operation: BridgeOperation::Login,
                ..
            }
        ));
        assert_eq!(channel.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_pending_registered_until_delivery() {
        let (host, mut calls) = ChannelHost::new();
        let channel = BridgeChannel::new(Arc::new(host));

        let invoke = channel.invoke(BridgeOperation::Logout);
        tokio::pin!(invoke);

        // Drive the call until it is waiting on the host.
        tokio::select! {
            _ = &mut invoke => panic!("resolved without delivery"),
            call = calls.recv() => {
                let call = call.unwrap();
                assert!(channel.is_pending(&call.correlation_id));
                assert_eq!(
                    channel.pending_operations(),
                    vec![(call.correlation_id, BridgeOperation::Logout)]
                );
                assert_eq!(
                    channel.deliver(call.correlation_id, NativeOutcome::done()),
                    DeliveryOutcome::Resolved
                );
            }
        }

        assert_eq!(invoke.await.unwrap(), "");
        assert_eq!(channel.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_dropped_future_releases_entry() {
        let (host, mut calls) = ChannelHost::new();
        let channel = BridgeChannel::new(Arc::new(host));

        {
            let invoke = channel.invoke(BridgeOperation::Login);
            tokio::pin!(invoke);
            tokio::select! {
                _ = &mut invoke => panic!("resolved without delivery"),
                _ = calls.recv() => {}
            }
            assert_eq!(channel.pending_count(), 1);
        }

        assert_eq!(channel.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_abandon_all() {
        let (host, mut calls) = ChannelHost::new();
        let channel = BridgeChannel::new(Arc::new(host));

        let invoke = channel.invoke(BridgeOperation::ExpireAccessToken);
        tokio::pin!(invoke);
        tokio::select! {
            _ = &mut invoke => panic!("resolved without delivery"),
            _ = calls.recv() => {}
        }

        assert_eq!(channel.abandon_all(), 1);
        let err = invoke.await.unwrap_err();
        assert!(matches!(err, BridgeError::Abandoned { .. }));
    }

    #[test]
    fn test_unknown_delivery_is_stale() {
        let channel = BridgeChannel::new(Arc::new(UnavailableHost));
        assert_eq!(
            channel.deliver(CorrelationId::new(), NativeOutcome::done()),
            DeliveryOutcome::Stale
        );
        assert_eq!(
            channel.deliver_raw("garbage", Some("tok"), None),
            DeliveryOutcome::Stale
        );
    }

    #[test]
    fn test_deliver_json_malformed() {
        let channel = BridgeChannel::new(Arc::new(UnavailableHost));
        assert!(matches!(
            channel.deliver_json("not json"),
            Err(BridgeError::MalformedDelivery(_))
        ));
    }

    #[test]
    fn test_with_config() {
        let config = BridgeConfig::default().with_invoke_timeout(Duration::from_secs(5));
        let channel = BridgeChannel::with_config(Arc::new(UnavailableHost), &config);
        assert_eq!(channel.timeout(), Some(Duration::from_secs(5)));
    }
}
