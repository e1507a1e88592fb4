//! Correlated calls into a native host shell.
//!
//! A web front-end embedded in a native shell can only fire named operations
//! at the host; the host answers later, out of band. This crate turns that
//! into ordinary awaitable calls.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  BridgeChannel                                               │
//! │  - mints a CorrelationId per call                            │
//! │  - records a pending invocation, then fires the NativeCall   │
//! │  - deliver*() resolves the pending invocation by id          │
//! └──────────────────────────────────────────────────────────────┘
//!              │ NativeCall                    ▲ deliver(id, outcome)
//!              ▼                               │
//! ┌──────────────────────────────────────────────────────────────┐
//! │  NativeHost (login UI, secure token storage, refresh)        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use shellbridge_bridge::{BridgeChannel, BridgeOperation, ChannelHost, NativeOutcome};
//!
//! let (host, mut calls) = ChannelHost::new();
//! let channel = Arc::new(BridgeChannel::new(Arc::new(host)));
//!
//! // The host side answers each call by correlation id
//! let responder = channel.clone();
//! tokio::spawn(async move {
//!     while let Some(call) = calls.recv().await {
//!         responder.deliver(call.correlation_id, NativeOutcome::Success("tok".into()));
//!     }
//! });
//!
//! let token = channel.invoke(BridgeOperation::GetAccessToken).await?;
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod host;
pub mod operation;
pub mod protocol;

pub use channel::{BridgeChannel, DeliveryOutcome};
pub use config::BridgeConfig;
pub use error::{BridgeError, ConfigError, Result};
pub use host::{ChannelHost, HostError, NativeHost, UnavailableHost};
pub use operation::{BridgeOperation, CorrelationId};
pub use protocol::{NativeCall, NativeOutcome, NativeResponse};
