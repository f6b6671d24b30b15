//! Turbo configuration.
//!
//! TOML-based configuration for the hybrid navigation session: start
//! location, bridge asset lookup, web view settings, screenshot memory
//! threshold, pull-to-refresh, logging, and destination routing rules.
//! Every section has defaults, so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use turbo_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    DestinationRule, LoggingConfig, Presentation, PullToRefreshConfig, ScreenshotConfig,
    SessionConfig, TurboConfig, WebViewSection, CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use turbo_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a documented default file if none exists.
pub fn load_config() -> Result<TurboConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<TurboConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &TurboConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&TurboConfig::default());
        assert!(json.contains("\"session\""));
        assert!(json.contains("\"webview\""));
        assert!(json.contains("\"screenshots\""));
        assert!(json.contains("\"pull_to_refresh\""));
        assert!(json.contains("\"logging\""));
        assert!(json.contains("\"destinations\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&TurboConfig::default());
        let parsed: TurboConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.session.bridge_asset, "js/turbo_bridge.js");
        assert_eq!(parsed.screenshots.min_heap_headroom, 0.10);
        assert_eq!(parsed.webview.background, "#ffffff");
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[screenshots]\nmin_heap_headroom = 2.0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
