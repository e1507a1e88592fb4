//! Bridge operations and correlation ids.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the named operations the native host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BridgeOperation {
    /// Run the host's login flow (e.g. an in-app browser).
    Login,
    /// Run the host's logout flow.
    Logout,
    /// Make the host's access token act as expired. Testing only.
    ExpireAccessToken,
    /// Make the host's refresh token act as expired. Testing only.
    ExpireRefreshToken,
    /// Return the host's current access token.
    GetAccessToken,
    /// Refresh and return a new access token.
    RefreshAccessToken,
}

impl BridgeOperation {
    pub const ALL: [BridgeOperation; 6] = [
        BridgeOperation::Login,
        BridgeOperation::Logout,
        BridgeOperation::ExpireAccessToken,
        BridgeOperation::ExpireRefreshToken,
        BridgeOperation::GetAccessToken,
        BridgeOperation::RefreshAccessToken,
    ];

    /// The name the host registers this operation under.
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeOperation::Login => "login",
            BridgeOperation::Logout => "logout",
            BridgeOperation::ExpireAccessToken => "expireAccessToken",
            BridgeOperation::ExpireRefreshToken => "expireRefreshToken",
            BridgeOperation::GetAccessToken => "getAccessToken",
            BridgeOperation::RefreshAccessToken => "refreshAccessToken",
        }
    }

    /// Whether the host expects the correlation id as the call argument.
    ///
    /// The token operations report back keyed by the argument they were
    /// given; the others take no argument.
    pub fn takes_correlation_argument(&self) -> bool {
        self.yields_token()
    }

    /// Whether a successful result carries a bearer token.
    pub fn yields_token(&self) -> bool {
        matches!(
            self,
            BridgeOperation::GetAccessToken | BridgeOperation::RefreshAccessToken
        )
    }
}

impl std::fmt::Display for BridgeOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BridgeOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BridgeOperation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown bridge operation: {s}"))
    }
}

/// Identifier binding a native call to its eventual delivery.
///
/// A random 128-bit UUID rendered in hyphenated lowercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Mint a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}
