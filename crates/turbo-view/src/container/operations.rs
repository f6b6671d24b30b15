//! State transitions: web view ownership, overlays, pull-to-refresh,
//! screenshot capture.

use tracing::debug;
use turbo_common::Size;
use turbo_webview::WebViewHost;

use crate::refresh::RefreshLayout;
use crate::screenshot::{ContentRenderer, Screenshot};
use crate::view::View;

use super::ViewContainer;

impl ViewContainer {
    /// Record the container's laid-out size.
    pub fn layout(&mut self, size: Size) {
        self.size = size;
        self.laid_out = true;
    }

    // -- Web view --

    /// Move the shared web view into this container.
    ///
    /// Returns `false` without changing anything when it is already here.
    /// The web view must have been detached from its previous container.
    pub fn attach_web_view(&mut self, host: &mut WebViewHost) -> bool {
        if !host.attach_to(self.id) {
            return false;
        }
        self.web_view_attached = true;
        if let Some(color) = self.options.background.filter(|c| c.is_opaque()) {
            host.set_background_color(color);
        }
        debug!(container = %self.id, "web view attached");
        true
    }

    /// Take the shared web view out of this container, if it is here.
    pub fn detach_web_view(&mut self, host: &mut WebViewHost) -> bool {
        if !host.detach_from(self.id) {
            return false;
        }
        self.web_view_attached = false;
        debug!(container = %self.id, "web view detached");
        true
    }

    // -- Progress --

    /// Show `view` in the progress region, replacing any previous one.
    ///
    /// Ignored while a screenshot is visible.
    ///
    /// # Panics
    ///
    /// If `view` still belongs to a container.
    pub fn add_progress_view(&mut self, mut view: View) {
        if self.is_screenshot_visible() {
            return;
        }
        assert!(
            !view.has_parent(),
            "Progress view cannot be attached to another parent"
        );
        self.remove_progress_view();
        self.remove_error_view();
        view.adopt(self.id);
        self.progress = Some(view);
    }

    pub fn remove_progress_view(&mut self) -> Option<View> {
        self.progress.take().map(View::release)
    }

    // -- Screenshot --

    /// Show `screenshot` over the web surface. `None` is ignored.
    pub fn add_screenshot(&mut self, screenshot: Option<Screenshot>) {
        let Some(screenshot) = screenshot else {
            return;
        };
        self.remove_progress_view();
        self.remove_error_view();
        self.screenshot = Some(screenshot);
    }

    pub fn remove_screenshot(&mut self) -> Option<Screenshot> {
        self.screenshot.take()
    }

    /// Capture the visible content, if the container is laid out with a
    /// positive size and enough memory is free.
    pub fn create_screenshot(&self, renderer: &dyn ContentRenderer) -> Option<Screenshot> {
        if !self.options.screenshots || !self.laid_out || !self.size.is_positive() {
            return None;
        }
        if !self.has_heap_headroom() {
            debug!(container = %self.id, "not enough memory for a screenshot");
            return None;
        }
        Some(Screenshot {
            bitmap: renderer.render(self.size),
            orientation: self.orientation(),
        })
    }

    fn has_heap_headroom(&self) -> bool {
        self.options
            .memory
            .usage()
            .is_some_and(|usage| usage.headroom() > self.options.min_heap_headroom)
    }

    // -- Error --

    /// Show `view` in the error region with its pull-to-refresh enabled and
    /// the indicator running.
    ///
    /// # Panics
    ///
    /// If `view` still belongs to a container.
    pub fn add_error_view(&mut self, mut view: View) {
        assert!(
            !view.has_parent(),
            "Error view cannot be attached to another parent"
        );
        self.remove_progress_view();
        self.remove_screenshot();
        self.error.take();
        view.adopt(self.id);
        self.error = Some(view);
        // set_refreshing is a no-op on a disabled layout
        self.error_refresh.set_enabled(true);
        self.error_refresh.set_refreshing(true);
    }

    /// Clear the error region and disarm its pull-to-refresh.
    pub fn remove_error_view(&mut self) -> Option<View> {
        self.error_refresh.set_refreshing(false);
        self.error_refresh.set_enabled(false);
        self.error.take().map(View::release)
    }

    // -- Pull-to-refresh --

    /// Whether the web content is scrolled away from the top.
    pub fn content_can_scroll_up(&self, host: &WebViewHost) -> bool {
        self.web_view_attached && RefreshLayout::can_child_scroll_up(host.scroll_y())
    }

    /// Whether the error view is scrolled away from the top.
    pub fn error_can_scroll_up(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(|v| RefreshLayout::can_child_scroll_up(v.scroll_y()))
    }

    /// Pull on the web content. Returns whether a refresh started.
    pub fn pull_content(&mut self, host: &WebViewHost) -> bool {
        if !self.web_view_attached {
            return false;
        }
        self.content_refresh.pull(host.scroll_y())
    }

    /// Pull on the error view. Returns whether a retry should start.
    ///
    /// The error indicator is already running while the error is shown, so
    /// any pull at the top of the view counts.
    pub fn pull_error(&mut self) -> bool {
        let Some(scroll_y) = self.error.as_ref().map(View::scroll_y) else {
            return false;
        };
        if !self.error_refresh.is_enabled() || RefreshLayout::can_child_scroll_up(scroll_y) {
            return false;
        }
        self.error_refresh.set_refreshing(true);
        true
    }

    /// Stop both refresh indicators.
    pub fn finish_refresh(&mut self) {
        self.content_refresh.set_refreshing(false);
        self.error_refresh.set_refreshing(false);
    }
}
