//! Bridge configuration.

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for a [`BridgeChannel`](crate::BridgeChannel).
///
/// ```toml
/// invoke_timeout_ms = 30000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Fail a native call that gets no delivery within this many
    /// milliseconds. Unset or zero means wait forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoke_timeout_ms: Option<u64>,
}

impl BridgeConfig {
    /// Sub-millisecond timeouts round up to 1 ms; a zero timeout disables it.
    pub fn with_invoke_timeout(mut self, timeout: Duration) -> Self {
        self.invoke_timeout_ms = if timeout.is_zero() {
            None
        } else {
            Some(u64::try_from(timeout.as_micros().div_ceil(1000)).unwrap_or(u64::MAX))
        };
        self
    }

    pub fn invoke_timeout(&self) -> Option<Duration> {
        self.invoke_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Parse from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        parse_toml(content)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_toml(path)
    }
}

/// Parse any TOML config document.
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read and parse a TOML config file.
///
/// Embedding applications use this for config files that carry a bridge
/// section alongside their own settings.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    parse_toml(&content).map_err(|e| match e {
        ConfigError::Parse(source) => ConfigError::ParseFile {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })
}
