//! CLI configuration.
//!
//! ```toml
//! [bridge]
//! invoke_timeout_ms = 5000
//!
//! [simulator]
//! access_token = "sim-access"
//! latency_ms = 20
//! fail = ["refreshAccessToken"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shellbridge_bridge::config::load_toml;
use shellbridge_bridge::{BridgeConfig, BridgeOperation, ConfigError};

/// Default config file name within the shellbridge config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bridge: BridgeConfig,
    pub simulator: SimulatorConfig,
}

/// Behaviour of the simulated native host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Access token handed out before any refresh.
    pub access_token: String,
    /// Prefix for tokens minted by `refreshAccessToken`.
    pub refresh_prefix: String,
    /// Delay before each delivery.
    pub latency_ms: u64,
    /// Whether the simulated user starts out logged in.
    pub logged_in: bool,
    /// Operations the host reports as failed.
    pub fail: Vec<BridgeOperation>,
    /// Operations the host never answers.
    pub ignore: Vec<BridgeOperation>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            access_token: "sim-access".to_string(),
            refresh_prefix: "sim-refreshed".to_string(),
            latency_ms: 10,
            logged_in: true,
            fail: Vec::new(),
            ignore: Vec::new(),
        }
    }
}

/// `$XDG_CONFIG_HOME/shellbridge/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shellbridge").join(CONFIG_FILE))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// if present, otherwise built-in defaults.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(p) => p,
            None => {
                tracing::debug!("no config file found, using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    let config: AppConfig = load_toml(&path)?;

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
