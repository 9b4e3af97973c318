//! Local oracle configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalOracleConfig {
    /// Simulated proving time per oracle call
    pub latency_ms: u64,
    /// Refuse moves made out of turn
    pub enforce_turns: bool,
}

impl Default for LocalOracleConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            enforce_turns: true,
        }
    }
}

impl LocalOracleConfig {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency_ms = latency.as_millis() as u64;
        self
    }

    pub fn with_turn_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_turns = enforce;
        self
    }

    pub fn latency(&self) -> Option<Duration> {
        (self.latency_ms > 0).then(|| Duration::from_millis(self.latency_ms))
    }
}
