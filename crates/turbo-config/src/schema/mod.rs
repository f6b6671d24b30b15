//! Configuration schema.
//!
//! `TurboConfig` is the root; each section lives in its own submodule and
//! carries `#[serde(default)]`, so a config file only needs to name the
//! values it overrides.

mod destinations;
mod logging;
mod screenshots;
mod session;
mod webview;

pub use destinations::{DestinationRule, Presentation};
pub use logging::{LoggingConfig, LOG_LEVELS};
pub use screenshots::{PullToRefreshConfig, ScreenshotConfig};
pub use session::SessionConfig;
pub use webview::WebViewSection;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TurboConfig {
    pub session: SessionConfig,
    pub webview: WebViewSection,
    pub screenshots: ScreenshotConfig,
    pub pull_to_refresh: PullToRefreshConfig,
    pub logging: LoggingConfig,
    pub destinations: Vec<DestinationRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: TurboConfig = toml::from_str("").unwrap();
        assert_eq!(config.session.start_location, "http://localhost:45678");
        assert_eq!(config.webview.background, "#ffffff");
        assert!(config.screenshots.enabled);
        assert!(config.pull_to_refresh.enabled);
        assert_eq!(config.logging.level, "info");
        assert!(config.destinations.is_empty());
    }

    #[test]
    fn destinations_parse_from_array_of_tables() {
        let config: TurboConfig = toml::from_str(
            r#"
[[destinations]]
pattern = "/new$"
uri = "turbo://fragment/web/modal/sheet"
presentation = "bottom_sheet"

[[destinations]]
pattern = "/edit$"
uri = "turbo://fragment/web/modal"
presentation = "modal"
"#,
        )
        .unwrap();
        assert_eq!(config.destinations.len(), 2);
        assert_eq!(config.destinations[0].presentation, Presentation::BottomSheet);
        assert_eq!(config.destinations[1].uri, "turbo://fragment/web/modal");
    }

    #[test]
    fn presentation_defaults_to_push() {
        let rule: DestinationRule = toml::from_str(
            r#"
pattern = ".*"
uri = "turbo://fragment/web"
"#,
        )
        .unwrap();
        assert_eq!(rule.presentation, Presentation::Push);
    }
}
