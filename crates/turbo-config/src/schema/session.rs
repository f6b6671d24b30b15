//! Session configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the session starts and how it finds the bridge script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Location loaded on cold boot.
    pub start_location: String,
    /// Asset name of the bundled bridge script.
    pub bridge_asset: String,
    /// Directory searched for assets before the bundled copies.
    pub assets_dir: Option<PathBuf>,
    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_location: "http://localhost:45678".to_string(),
            bridge_asset: "js/turbo_bridge.js".to_string(),
            assets_dir: None,
            user_agent: Some("Turbo Native Rust".to_string()),
        }
    }
}
