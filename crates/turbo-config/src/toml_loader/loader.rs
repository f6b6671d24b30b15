//! Reading `TurboConfig` from TOML.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};
use turbo_common::ConfigError;

use super::paths::{create_default_config, default_config_path};
use crate::schema::TurboConfig;
use crate::validation;

/// Parse the TOML file at `path`.
///
/// Missing fields take serde defaults. Validation problems are only
/// logged; [`crate::load_config_from`] is the strict variant.
pub fn load_from_path(path: &Path) -> Result<TurboConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("cannot read {}: {e}", path.display())),
    })?;

    let config: TurboConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "config has problems: {e}");
    }
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load from [`default_config_path`], writing the documented default
/// file first when none exists.
pub fn load_default() -> Result<TurboConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            Ok(TurboConfig::default())
        }
        loaded => loaded,
    }
}
