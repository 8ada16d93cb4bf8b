//! Dashboard configuration supplied by each launcher.
//!
//! Launchers provide a [`DashboardConfig`] through Dioxus context; views fall back to
//! [`DashboardConfig::default`] when none was provided.

use serde::{Deserialize, Serialize};

/// Relative location of the bundled payload.
pub const DEFAULT_DATA_SOURCE: &str = "mock_data.json";

/// Delay between two replay ticks.
pub const DEFAULT_TICK_MS: u64 = 260;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// URL (web) or filesystem path (native) of the snapshot JSON.
    pub data_source: String,
    pub tick_ms: u64,
    /// Payload compiled into the binary. When set, nothing is read and `data_source`
    /// only names the payload in logs.
    #[serde(skip)]
    pub embedded: Option<&'static str>,
}

impl DashboardConfig {
    pub fn with_data_source(source: impl Into<String>) -> Self {
        Self {
            data_source: source.into(),
            ..Self::default()
        }
    }

    pub fn embedded(name: impl Into<String>, payload: &'static str) -> Self {
        Self {
            data_source: name.into(),
            embedded: Some(payload),
            ..Self::default()
        }
    }

    pub fn tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms.max(1);
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            tick_ms: DEFAULT_TICK_MS,
            embedded: None,
        }
    }
}
