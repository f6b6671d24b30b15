//! Web view settings.

use serde::{Deserialize, Serialize};

/// Presentation settings for the shared web view.
///
/// Script execution, DOM storage and multiple windows are always enabled
/// and cannot be switched off here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSection {
    /// Background color of view containers, propagated to the web view on attach.
    pub background: String,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
}

impl Default for WebViewSection {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            devtools: cfg!(debug_assertions),
        }
    }
}
