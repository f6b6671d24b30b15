//! Screenshot and pull-to-refresh configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    pub enabled: bool,
    /// Fraction of memory that must remain free before a capture is attempted.
    pub min_heap_headroom: f64,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_heap_headroom: 0.10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PullToRefreshConfig {
    pub enabled: bool,
}

impl Default for PullToRefreshConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
