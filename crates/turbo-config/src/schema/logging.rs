//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// `tracing-subscriber` filter directive for this level.
    pub fn directive(&self) -> String {
        format!("turbo={}", self.level.to_lowercase())
    }
}
