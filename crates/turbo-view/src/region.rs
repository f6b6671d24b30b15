//! Stable identifiers for the regions of a view container.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four child regions every container lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    WebSurface,
    Progress,
    Error,
    Screenshot,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::WebSurface,
        Region::Progress,
        Region::Error,
        Region::Screenshot,
    ];

    /// Identifier host layouts use to address the region.
    pub fn id(self) -> &'static str {
        match self {
            Region::WebSurface => "turbo_webView_container",
            Region::Progress => "turbo_progress_container",
            Region::Error => "turbo_error_container",
            Region::Screenshot => "turbo_screenshot",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.id() == id)
    }

    /// Regions drawn over the web surface.
    pub fn is_overlay(self) -> bool {
        !matches!(self, Region::WebSurface)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
