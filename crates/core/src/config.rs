//! Probe configuration and settings

use crate::detection::ScanStrategy;
use abiprobe_utils::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

/// Configuration shared by the CLI and the HTTP server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// How selector comparisons are scanned
    pub scan: ScanStrategy,

    /// Node used to resolve addresses
    pub rpc: RpcConfig,
}

/// JSON-RPC node configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// HTTP endpoint of the node
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Block tag passed to `eth_getCode`
    pub block_tag: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8545".to_string(),
            timeout_secs: 30,
            block_tag: "latest".to_string(),
        }
    }
}

impl RpcConfig {
    /// Default settings against another endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Request timeout as a `Duration`.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ProbeConfig {
    /// Loads a JSON configuration file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
