//! Bridge installation.
//!
//! The bridge is a global object the bundled script installs into the page.
//! A full page load wipes the page's script context, so presence is checked
//! before every visit command and the script is evaluated again when the
//! object is gone.

use std::sync::Arc;

use crate::ui::ScriptRunner;

/// Script evaluating to `true` when the bridge object is absent.
pub const BRIDGE_ABSENT_PROBE: &str = "window.turboNative == null";

pub type BridgeCallback = Box<dyn FnOnce() + Send + 'static>;

/// Answers whether the bridge is missing from the current page.
pub trait BridgeState: Send + Sync {
    /// Report absence to `on_result`, asynchronously and on the UI thread.
    fn query_absent(&self, runner: &ScriptRunner, on_result: Box<dyn FnOnce(bool) + Send>);
}

/// Checks presence by evaluating [`BRIDGE_ABSENT_PROBE`] in the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptProbe;

impl BridgeState for ScriptProbe {
    fn query_absent(&self, runner: &ScriptRunner, on_result: Box<dyn FnOnce(bool) + Send>) {
        runner.run_javascript(BRIDGE_ABSENT_PROBE, move |result| {
            on_result(is_true(result.as_deref()));
        });
    }
}

fn is_true(result: Option<&str>) -> bool {
    result.is_some_and(|s| s.trim().eq_ignore_ascii_case("true"))
}

/// Ensures the bridge exists before a visit command is sent.
#[derive(Clone)]
pub struct BridgeInstaller {
    runner: ScriptRunner,
    script: Arc<str>,
    state: Arc<dyn BridgeState>,
}

impl BridgeInstaller {
    pub fn new(runner: ScriptRunner, script: impl Into<Arc<str>>) -> Self {
        Self::with_state(runner, script, Arc::new(ScriptProbe))
    }

    pub fn with_state(
        runner: ScriptRunner,
        script: impl Into<Arc<str>>,
        state: Arc<dyn BridgeState>,
    ) -> Self {
        Self {
            runner,
            script: script.into(),
            state,
        }
    }

    /// Install the bridge if it is missing.
    ///
    /// Exactly one callback fires: `on_installed` after the bridge script has
    /// been evaluated, or `on_complete` when the bridge was already present.
    /// Neither fires if the engine never finishes a script it was given.
    pub fn install_bridge(&self, on_installed: BridgeCallback, on_complete: BridgeCallback) {
        let runner = self.runner.clone();
        let script = Arc::clone(&self.script);
        self.state.query_absent(
            &self.runner,
            Box::new(move |absent| {
                if absent {
                    runner.run_javascript(&*script, move |_| on_installed());
                } else {
                    on_complete();
                }
            }),
        );
    }
}
