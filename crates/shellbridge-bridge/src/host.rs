//! The native host invocation seam.

use tokio::sync::mpsc;

use crate::protocol::NativeCall;

/// The host's invocation primitive could not be reached.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Fires operations into the native host.
///
/// Implementations must return as soon as the call has been handed over; the
/// result arrives later through one of the channel's `deliver` entry points.
pub trait NativeHost: Send + Sync + std::fmt::Debug {
    fn invoke(&self, call: &NativeCall) -> Result<(), HostError>;
}

/// Host that forwards every call over an in-process queue.
///
/// The receiving end plays the native side: it takes [`NativeCall`]s off the
/// queue and answers through [`BridgeChannel::deliver`](crate::BridgeChannel::deliver).
#[derive(Debug, Clone)]
pub struct ChannelHost {
    tx: mpsc::UnboundedSender<NativeCall>,
}

impl ChannelHost {
    /// Create the host and the receiver the native side reads calls from.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NativeCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NativeHost for ChannelHost {
    fn invoke(&self, call: &NativeCall) -> Result<(), HostError> {
        self.tx
            .send(call.clone())
            .map_err(|_| HostError::new("native host is no longer receiving calls"))
    }
}

/// Host used when no native shell is present.
#[derive(Debug, Clone, Default)]
pub struct UnavailableHost;

impl NativeHost for UnavailableHost {
    fn invoke(&self, call: &NativeCall) -> Result<(), HostError> {
        Err(HostError::new(format!(
            "no native host to run '{}'",
            call.operation
        )))
    }
}
