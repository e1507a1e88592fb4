//! Error types for the native bridge.

use std::time::Duration;

use crate::operation::{BridgeOperation, CorrelationId};

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors returned to a caller awaiting a native operation.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The native invocation primitive could not be reached.
    #[error("native bridge unavailable for '{operation}': {reason}")]
    BridgeUnavailable {
        operation: BridgeOperation,
        reason: String,
    },

    /// The native host reported a failure for this call.
    #[error("native operation '{operation}' failed: {message}")]
    NativeOperationFailed {
        operation: BridgeOperation,
        message: String,
    },

    /// No delivery arrived within the configured deadline.
    #[error("native operation '{operation}' ({correlation_id}) timed out after {elapsed:?}")]
    Timeout {
        operation: BridgeOperation,
        correlation_id: CorrelationId,
        elapsed: Duration,
    },

    /// The channel discarded the pending call without a delivery.
    #[error("native operation '{operation}' was abandoned")]
    Abandoned { operation: BridgeOperation },

    /// A delivery message from the host could not be parsed.
    #[error("malformed delivery: {0}")]
    MalformedDelivery(#[from] serde_json::Error),
}

impl BridgeError {
    /// The operation this error relates to, if any.
    pub fn operation(&self) -> Option<BridgeOperation> {
        match self {
            Self::BridgeUnavailable { operation, .. }
            | Self::NativeOperationFailed { operation, .. }
            | Self::Timeout { operation, .. }
            | Self::Abandoned { operation } => Some(*operation),
            Self::MalformedDelivery(_) => None,
        }
    }
}

/// Errors that can occur while loading bridge configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to parse a TOML config file.
    #[error("failed to parse config file '{path}': {source}")]
    ParseFile {
        path: String,
        source: toml::de::Error,
    },
}
