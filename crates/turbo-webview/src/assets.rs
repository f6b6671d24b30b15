//! Bundled script assets.
//!
//! Assets are looked up by name (`js/turbo_bridge.js`). Resolution order:
//! in-memory overrides, then an optional directory on disk, then the copies
//! compiled into the crate.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use turbo_common::BridgeError;

/// Name of the bridge script asset.
pub const BRIDGE_ASSET: &str = "js/turbo_bridge.js";

const BUNDLED: &[(&str, &str)] = &[(BRIDGE_ASSET, include_str!("../assets/js/turbo_bridge.js"))];

/// Resolves asset names to their text content.
#[derive(Debug, Default, Clone)]
pub struct AssetSource {
    /// Directory searched before the bundled assets.
    base_dir: Option<PathBuf>,
    /// In-memory overrides (for dynamically generated content).
    overrides: HashMap<String, String>,
}

impl AssetSource {
    /// Only the bundled assets.
    pub fn bundled() -> Self {
        Self::default()
    }

    /// Bundled assets, shadowed by files under `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            overrides: HashMap::new(),
        }
    }

    /// Register an in-memory asset override.
    pub fn add_override(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.overrides.insert(name.into(), content.into());
    }

    /// Resolve an asset name to its content.
    pub fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        let clean = name.trim_start_matches('/');

        if let Some(content) = self.overrides.get(clean) {
            return Some(Cow::Borrowed(content.as_str()));
        }

        if let Some(base_dir) = &self.base_dir {
            if let Some(content) = read_within(base_dir, clean) {
                debug!(asset = clean, dir = %base_dir.display(), "asset loaded from disk");
                return Some(Cow::Owned(content));
            }
        }

        BUNDLED
            .iter()
            .find(|(bundled, _)| *bundled == clean)
            .map(|(_, content)| Cow::Borrowed(*content))
    }

    /// Resolve an asset or fail with [`BridgeError::AssetNotFound`].
    pub fn load(&self, name: &str) -> Result<String, BridgeError> {
        self.resolve(name)
            .map(Cow::into_owned)
            .ok_or_else(|| BridgeError::AssetNotFound(name.to_string()))
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

/// Read `name` under `base_dir`, refusing paths that escape it (including
/// through symlinks).
fn read_within(base_dir: &Path, name: &str) -> Option<String> {
    let canonical_base = std::fs::canonicalize(base_dir).ok()?;
    let canonical_file = std::fs::canonicalize(base_dir.join(name)).ok()?;
    if !canonical_file.starts_with(&canonical_base) {
        return None;
    }
    std::fs::read_to_string(canonical_file).ok()
}
