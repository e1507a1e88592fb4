//! Error types for the authentication coordinator.

use shellbridge_bridge::{BridgeError, BridgeOperation};

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors returned by authenticator operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The native bridge call failed.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// The host returned a token that cannot be sent in a header.
    #[error("token returned by '{operation}' is not a valid header value")]
    InvalidToken { operation: BridgeOperation },
}

impl AuthError {
    /// Whether the host reported an explicit failure, as opposed to the
    /// bridge itself being unreachable.
    pub fn is_native_failure(&self) -> bool {
        matches!(
            self,
            AuthError::Bridge(BridgeError::NativeOperationFailed { .. })
        )
    }
}
