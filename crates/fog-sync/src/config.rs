//! Synchronization configuration

use crate::DEFAULT_ORACLE_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Protocol configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Ceiling for each oracle call in milliseconds (None = wait forever)
    pub oracle_timeout_ms: Option<u64>,
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.oracle_timeout_ms = None;
        self
    }

    pub fn oracle_timeout(&self) -> Option<Duration> {
        self.oracle_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            oracle_timeout_ms: Some(DEFAULT_ORACLE_TIMEOUT_MS),
        }
    }
}
