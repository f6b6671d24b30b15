//! The single shared web view.
//!
//! One `WebViewHost` exists per session. View containers take turns owning
//! it: the host carries the id of its current parent and refuses to be
//! attached elsewhere until it has been detached.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info};
use turbo_common::{BridgeError, Color, ContainerId, VisitIdentifier};

use crate::assets::{AssetSource, BRIDGE_ASSET};
use crate::bridge::{BridgeCallback, BridgeInstaller, BridgeState};
use crate::encode::encode_visit;
use crate::engine::{EngineProvider, WebSettings};
use crate::ui::{ScriptRunner, UiThread};
use crate::visit::VisitOptions;

const VISIT_FUNCTION: &str = "turboNative.visitLocationWithOptionsAndRestorationIdentifier";
const COLD_BOOT_FUNCTION: &str = "turboNative.visitRenderedForColdBoot";

/// Handle to the shared web view and its bridge.
pub struct WebViewHost {
    runner: ScriptRunner,
    installer: BridgeInstaller,
    provider: Option<EngineProvider>,
    settings: WebSettings,
    parent: Option<ContainerId>,
    background: Option<Color>,
    scroll_y: i32,
}

impl WebViewHost {
    /// Create the host and queue the one-time engine settings.
    pub fn new(
        runner: ScriptRunner,
        provider: Option<EngineProvider>,
        bridge_script: impl Into<Arc<str>>,
        settings: WebSettings,
    ) -> Self {
        runner.configure(settings.clone());
        let installer = BridgeInstaller::new(runner.clone(), bridge_script);
        Self {
            runner,
            installer,
            provider,
            settings,
            parent: None,
            background: None,
            scroll_y: 0,
        }
    }

    /// Create a host for the engine owned by `ui`, loading the bridge script
    /// from `assets`.
    pub fn for_ui(
        ui: &UiThread,
        assets: &AssetSource,
        settings: WebSettings,
    ) -> Result<Self, BridgeError> {
        let script = assets.load(BRIDGE_ASSET)?;
        Ok(Self::new(ui.runner(), ui.provider(), script, settings))
    }

    /// Replace how bridge presence is detected.
    pub fn with_bridge_state(
        mut self,
        bridge_script: impl Into<Arc<str>>,
        state: Arc<dyn BridgeState>,
    ) -> Self {
        self.installer = BridgeInstaller::with_state(self.runner.clone(), bridge_script, state);
        self
    }

    pub fn package_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.package_name.as_str())
    }

    pub fn version_name(&self) -> Option<&str> {
        self.provider.as_ref()?.version_name.as_deref()
    }

    /// Leading numeric segment of the engine version, e.g. `120` for
    /// `"120.0.6099.43"`.
    pub fn major_version(&self) -> Option<i32> {
        let version = self.version_name()?;
        version.split('.').next()?.trim().parse().ok()
    }

    pub fn settings(&self) -> &WebSettings {
        &self.settings
    }

    pub fn runner(&self) -> &ScriptRunner {
        &self.runner
    }

    /// Start a full page load. The page's bridge is lost.
    pub fn load_url(&self, url: &str) {
        debug!(url, "loading url");
        self.runner.load_url(url);
    }

    /// Visit `location` through the page's bridge, installing it first if
    /// the page lost it.
    pub fn visit_location(
        &self,
        location: &str,
        options: &VisitOptions,
        restoration_identifier: &VisitIdentifier,
    ) -> Result<(), BridgeError> {
        let args = encode_visit(location, options, restoration_identifier)?;
        debug!(location, action = ?options.action, "visit location");
        self.call_after_bridge("visitLocation", format!("{VISIT_FUNCTION}({args})"));
        Ok(())
    }

    /// Tell the page the cold boot visit has been rendered natively.
    pub fn visit_rendered_for_cold_boot(&self, cold_boot_visit_identifier: &VisitIdentifier) {
        self.call_after_bridge(
            "visitRenderedForColdBoot",
            format!("{COLD_BOOT_FUNCTION}('{cold_boot_visit_identifier}')"),
        );
    }

    pub fn install_bridge(&self, on_installed: BridgeCallback, on_complete: BridgeCallback) {
        self.installer.install_bridge(on_installed, on_complete);
    }

    /// Run `script` on the UI thread; `on_complete` receives its result there.
    pub fn run_javascript<F>(&self, script: impl Into<String>, on_complete: F)
    where
        F: FnOnce(Option<String>) + Send + 'static,
    {
        self.runner.run_javascript(script, on_complete);
    }

    /// Run `script` on the UI thread and resolve with its result.
    pub fn evaluate(&self, script: impl Into<String>) -> oneshot::Receiver<Option<String>> {
        self.runner.evaluate(script)
    }

    fn call_after_bridge(&self, method: &'static str, script: String) {
        let after_install = self.runner.clone();
        let installed_script = script.clone();
        let present = self.runner.clone();
        self.installer.install_bridge(
            Box::new(move || {
                info!(event = "ReInstallBridge", method);
                after_install.run_javascript(installed_script, |_| {});
            }),
            Box::new(move || present.run_javascript(script, |_| {})),
        );
    }

    /// Container currently holding the web view.
    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }

    /// Record `container` as the owner. Returns `false` when it already is.
    ///
    /// # Panics
    ///
    /// If another container still owns the web view.
    pub fn attach_to(&mut self, container: ContainerId) -> bool {
        if self.parent == Some(container) {
            return false;
        }
        if let Some(owner) = self.parent {
            panic!("Web view is still attached to {owner}");
        }
        self.parent = Some(container);
        true
    }

    /// Release ownership if `container` holds the web view.
    pub fn detach_from(&mut self, container: ContainerId) -> bool {
        if self.parent != Some(container) {
            return false;
        }
        self.parent = None;
        true
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background = Some(color);
        self.runner.set_background(color);
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background
    }

    /// Vertical scroll offset last reported by the page.
    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, scroll_y: i32) {
        self.scroll_y = scroll_y;
    }
}
