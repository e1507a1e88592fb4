//! Messages exchanged with the native host.
//!
//! The host receives a [`NativeCall`] for every invocation and answers with a
//! [`NativeResponse`] keyed by the same correlation id:
//!
//! ```text
//! -> {"operation": "getAccessToken", "correlationId": "5f0c...", "argument": "5f0c..."}
//! <- {"correlationId": "5f0c...", "result": "eyJhbGciOi..."}
//! <- {"correlationId": "5f0c...", "error": "refresh token expired"}
//! ```

use serde::{Deserialize, Serialize};

use crate::operation::{BridgeOperation, CorrelationId};

/// A single invocation of a native operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCall {
    /// Operation to run.
    pub operation: BridgeOperation,
    /// Key the host must deliver the result under.
    pub correlation_id: CorrelationId,
    /// String argument passed to the operation, if it takes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

impl NativeCall {
    /// Build the call for `operation`, passing the correlation id as the
    /// argument for operations that report back by argument.
    pub fn new(operation: BridgeOperation, correlation_id: CorrelationId) -> Self {
        let argument = operation
            .takes_correlation_argument()
            .then(|| correlation_id.to_string());
        Self {
            operation,
            correlation_id,
            argument,
        }
    }

    /// Serialize for hosts that accept string messages.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Result of a native operation as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeOutcome {
    /// Completed; the string is empty for operations without a value.
    Success(String),
    /// The host reported an explicit failure.
    Failure(String),
}

impl NativeOutcome {
    /// Successful completion of an operation that yields no value.
    pub fn done() -> Self {
        Self::Success(String::new())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Delivery message sent by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeResponse {
    /// Correlation id as the host received it. Kept as a string so that a
    /// malformed id is reported as a stale delivery rather than a parse error.
    pub correlation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NativeResponse {
    /// An error field takes precedence over a result.
    pub fn into_outcome(self) -> NativeOutcome {
        match self.error {
            Some(message) => NativeOutcome::Failure(message),
            None => NativeOutcome::Success(self.result.unwrap_or_default()),
        }
    }
}
