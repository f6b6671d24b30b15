//! The browser engine seam.
//!
//! A `ScriptEngine` is the embeddable browser surface: it evaluates script
//! in the page context, loads URLs, reports page/IPC events, and describes
//! the engine provider. Engines are owned by the [`UiThread`](crate::UiThread)
//! and only ever touched from it, so they need not be `Send`.

pub mod scripted;
#[cfg(feature = "wry")]
pub mod wry_engine;

use serde::{Deserialize, Serialize};
use turbo_common::Color;

/// Completion for a script evaluation. Receives the stringified result,
/// or `None` when the script produced no value.
pub type ScriptCallback = Box<dyn FnOnce(Option<String>) + Send + 'static>;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

/// Events emitted by an engine, drained by the host's event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// The page posted a message through the bridge.
    Message { body: String },
}

/// Identity of the browser engine implementation backing a web view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineProvider {
    pub package_name: String,
    pub version_name: Option<String>,
}

/// Settings applied once when the shared web view is constructed.
///
/// Script execution, DOM storage and multiple-window support are always
/// enabled and the surface always fills its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSettings {
    javascript_enabled: bool,
    dom_storage_enabled: bool,
    multiple_windows: bool,
    match_parent: bool,
    pub user_agent: Option<String>,
    pub devtools: bool,
}

impl WebSettings {
    pub fn new(user_agent: Option<String>, devtools: bool) -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            multiple_windows: true,
            match_parent: true,
            user_agent,
            devtools,
        }
    }

    pub fn javascript_enabled(&self) -> bool {
        self.javascript_enabled
    }

    pub fn dom_storage_enabled(&self) -> bool {
        self.dom_storage_enabled
    }

    pub fn multiple_windows(&self) -> bool {
        self.multiple_windows
    }

    pub fn match_parent(&self) -> bool {
        self.match_parent
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self::new(None, cfg!(debug_assertions))
    }
}

/// An embeddable browser surface.
pub trait ScriptEngine {
    /// Apply the one-time construction settings.
    fn apply_settings(&mut self, settings: &WebSettings);

    /// Evaluate `script` in the page context. `on_complete` is invoked at most
    /// once, possibly from another thread; an engine that fails to evaluate
    /// the script may never invoke it.
    fn evaluate(&mut self, script: &str, on_complete: ScriptCallback);

    /// Start a full page load. Wipes the page's script context.
    fn load_url(&mut self, url: &str);

    /// Paint `color` behind page content.
    fn set_background(&mut self, color: Color);

    /// Take all events emitted since the last call.
    fn drain_events(&mut self) -> Vec<EngineEvent>;

    /// Engine provider, or `None` when it cannot be determined.
    fn provider(&self) -> Option<EngineProvider>;
}
