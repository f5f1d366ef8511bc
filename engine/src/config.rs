//! Engine configuration with TOML file support.

use crate::error::EngineError;
use layermap_ledger::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a traversal run.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). CLI flags override file values
/// at the binary layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the ledger RPC gateway.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hard cap on traversal depth: nodes at this layer are verified but
    /// never expanded.
    #[serde(default = "default_max_layers")]
    pub max_layers: u32,

    /// Hard cap on the number of nodes processed in one run.
    #[serde(default = "default_max_nodes")]
    pub max_nodes: u64,

    /// Save a checkpoint every this many processed nodes.
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: u64,

    /// Path of the checkpoint file.
    #[serde(default = "default_checkpoint_path")]
    pub checkpoint_path: PathBuf,

    /// Request-per-second ceiling of the remote ledger gateway.
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u64,

    /// Retry/backoff parameters for ledger lookups.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Retry/backoff parameters, parameterized once for the whole run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://rpc.layermap.net".to_string()
}

fn default_max_layers() -> u32 {
    10
}

fn default_max_nodes() -> u64 {
    10_000
}

fn default_checkpoint_interval() -> u64 {
    100
}

fn default_checkpoint_path() -> PathBuf {
    PathBuf::from("layermap_checkpoint.json")
}

fn default_requests_per_second() -> u64 {
    3
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    8_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_layers: default_max_layers(),
            max_nodes: default_max_nodes(),
            checkpoint_interval: default_checkpoint_interval(),
            checkpoint_path: default_checkpoint_path(),
            requests_per_second: default_requests_per_second(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| EngineError::Config(format!("parse {}: {e}", path.display())))
    }
}

impl RetryConfig {
    /// Build the retry policy these parameters describe.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.base_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }
}
