//! CLI configuration

use anyhow::{Context, Result};
use fog_sync::SyncConfig;
use local_oracle::LocalOracleConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings loadable from a JSON file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Protocol settings (oracle timeout)
    pub sync: SyncConfig,
    /// Local oracle settings (latency, turn enforcement)
    pub oracle: LocalOracleConfig,
    /// Print both boards after every half-move, not only at the end
    pub show_boards: bool,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}
