//! Per-section validators.

use regex::Regex;
use url::Url;

use crate::schema::{TurboConfig, LOG_LEVELS};

use super::helpers::{validate_color, validate_range_f64};

pub(super) fn validate_session(errors: &mut Vec<String>, config: &TurboConfig) {
    let location = &config.session.start_location;
    match Url::parse(location) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") || url.host().is_none() => {
            errors.push(format!(
                "session.start_location = {location:?} must be an http(s) URL with a host"
            ));
        }
        Ok(_) => {}
        Err(e) => errors.push(format!("session.start_location = {location:?}: {e}")),
    }
    if config.session.bridge_asset.trim().is_empty() {
        errors.push("session.bridge_asset must not be empty".to_string());
    }
}

pub(super) fn validate_webview(errors: &mut Vec<String>, config: &TurboConfig) {
    validate_color(errors, "webview.background", &config.webview.background);
}

pub(super) fn validate_screenshots(errors: &mut Vec<String>, config: &TurboConfig) {
    validate_range_f64(
        errors,
        "screenshots.min_heap_headroom",
        config.screenshots.min_heap_headroom,
        0.0,
        1.0,
    );
}

pub(super) fn validate_logging(errors: &mut Vec<String>, config: &TurboConfig) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "logging.level = {:?} must be one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }
}

pub(super) fn validate_destinations(errors: &mut Vec<String>, config: &TurboConfig) {
    for (i, rule) in config.destinations.iter().enumerate() {
        if let Err(e) = Regex::new(&rule.pattern) {
            errors.push(format!("destinations[{i}].pattern is not a valid regex: {e}"));
        }
        if rule.uri.trim().is_empty() {
            errors.push(format!("destinations[{i}].uri must not be empty"));
        }
    }
}
