//! Mapping from configuration to runtime settings.

use std::sync::Arc;

use tracing::warn;
use turbo_common::{BridgeError, Color};
use turbo_config::TurboConfig;
use turbo_view::{ContainerOptions, SystemMemory};
use turbo_webview::{AssetSource, UiThread, WebSettings, WebViewHost};

pub fn web_settings(config: &TurboConfig) -> WebSettings {
    WebSettings::new(config.session.user_agent.clone(), config.webview.devtools)
}

pub fn asset_source(config: &TurboConfig) -> AssetSource {
    match &config.session.assets_dir {
        Some(dir) => AssetSource::with_base_dir(dir),
        None => AssetSource::bundled(),
    }
}

pub fn container_options(config: &TurboConfig) -> ContainerOptions {
    let background = Color::from_hex(&config.webview.background);
    if background.is_none() {
        warn!(
            background = %config.webview.background,
            "invalid background color, containers keep the default"
        );
    }
    ContainerOptions {
        background: background.or(Some(Color::WHITE)),
        pull_to_refresh: config.pull_to_refresh.enabled,
        screenshots: config.screenshots.enabled,
        min_heap_headroom: config.screenshots.min_heap_headroom,
        memory: Arc::new(SystemMemory::new()),
    }
}

/// Create the shared web view host for the engine owned by `ui`.
pub fn build_host(ui: &UiThread, config: &TurboConfig) -> Result<WebViewHost, BridgeError> {
    let script = asset_source(config).load(&config.session.bridge_asset)?;
    Ok(WebViewHost::new(
        ui.runner(),
        ui.provider(),
        script,
        web_settings(config),
    ))
}
