//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator runs them all and
//! collects every error into a single `ConfigError`.

mod helpers;
mod sections;


use crate::schema::TurboConfig;
use turbo_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TurboConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_session(&mut errors, config);
    sections::validate_webview(&mut errors, config);
    sections::validate_screenshots(&mut errors, config);
    sections::validate_logging(&mut errors, config);
    sections::validate_destinations(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
