//! `wry` backed engine.
//!
//! Hosts a real platform web view inside a native window. Page load
//! and IPC handlers push into a shared event sink that the UI thread drains.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};
use turbo_common::Color;
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use super::{EngineEvent, EngineProvider, PageLoadState, ScriptCallback, ScriptEngine, WebSettings};

#[cfg(target_os = "linux")]
const PLATFORM_PACKAGE: &str = "org.webkitgtk.webkit2gtk";
#[cfg(target_os = "windows")]
const PLATFORM_PACKAGE: &str = "com.microsoft.webview2";
#[cfg(any(target_os = "macos", target_os = "ios"))]
const PLATFORM_PACKAGE: &str = "com.apple.WebKit";
#[cfg(target_os = "android")]
const PLATFORM_PACKAGE: &str = "com.google.android.webview";
#[cfg(not(any(
    target_os = "linux",
    target_os = "windows",
    target_os = "macos",
    target_os = "ios",
    target_os = "android"
)))]
const PLATFORM_PACKAGE: &str = "unknown";

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

type EventSink = Arc<Mutex<Vec<EngineEvent>>>;

fn push(events: &EventSink, event: EngineEvent) {
    events
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(event);
}

/// A platform web view driven through [`ScriptEngine`].
pub struct WryEngine {
    webview: WebView,
    events: EventSink,
    settings: WebSettings,
}

impl WryEngine {
    /// Build the web view filling `window` and start loading `url`.
    ///
    /// Settings are baked in here: the platform web view cannot change them
    /// after construction.
    pub fn build<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        url: &str,
        settings: WebSettings,
    ) -> Result<Self, wry::Error> {
        let events: EventSink = Arc::new(Mutex::new(Vec::new()));

        let mut builder = WebViewBuilder::new()
            .with_url(url)
            .with_devtools(settings.devtools)
            .with_clipboard(true)
            .with_focused(true);
        if let Some(ua) = &settings.user_agent {
            builder = builder.with_user_agent(ua);
        }
        builder = attach_ipc_handler(builder, Arc::clone(&events));
        builder = attach_page_load_handler(builder, Arc::clone(&events));

        let webview = builder.build(window)?;
        debug!(url, "web view created");

        Ok(Self {
            webview,
            events,
            settings,
        })
    }

    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}

fn attach_ipc_handler<'a>(builder: WebViewBuilder<'a>, events: EventSink) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();
        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }
        push(&events, EngineEvent::Message { body });
    })
}

fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        push(&events, EngineEvent::PageLoad { state, url });
    })
}

impl ScriptEngine for WryEngine {
    fn apply_settings(&mut self, settings: &WebSettings) {
        if *settings != self.settings {
            warn!("web view settings are fixed once built, ignoring new settings");
        }
    }

    fn evaluate(&mut self, script: &str, on_complete: ScriptCallback) {
        // wry takes a reusable callback; the completion may only run once.
        let slot = Mutex::new(Some(on_complete));
        let result = self.webview.evaluate_script_with_callback(script, move |value| {
            let callback = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(callback) = callback {
                let value = (!value.is_empty() && value != "null" && value != "undefined")
                    .then_some(value);
                callback(value);
            }
        });
        if let Err(e) = result {
            warn!(error = %e, "script evaluation failed");
        }
    }

    fn load_url(&mut self, url: &str) {
        if let Err(e) = self.webview.load_url(url) {
            warn!(url, error = %e, "failed to load url");
        }
    }

    fn set_background(&mut self, color: Color) {
        if let Err(e) = self.webview.set_background_color((color.r, color.g, color.b, color.a)) {
            warn!(error = %e, "failed to set background color");
        }
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn provider(&self) -> Option<EngineProvider> {
        let version_name = wry::webview_version().ok();
        Some(EngineProvider {
            package_name: PLATFORM_PACKAGE.to_string(),
            version_name,
        })
    }
}
