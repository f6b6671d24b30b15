//! Core types and constructors for ViewContainer.

use std::fmt;
use std::sync::Arc;

use turbo_common::{Color, ContainerId, Orientation, Size};

use crate::memory::{MemoryProbe, SystemMemory};
use crate::refresh::RefreshLayout;
use crate::region::Region;
use crate::screenshot::Screenshot;
use crate::view::View;

/// Minimum free memory fraction required before capturing a screenshot.
pub const DEFAULT_MIN_HEAP_HEADROOM: f64 = 0.10;

/// Construction options for a container.
#[derive(Clone)]
pub struct ContainerOptions {
    /// Painted behind the web view while this container hosts it.
    pub background: Option<Color>,
    pub pull_to_refresh: bool,
    pub screenshots: bool,
    pub min_heap_headroom: f64,
    pub memory: Arc<dyn MemoryProbe>,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            background: Some(Color::WHITE),
            pull_to_refresh: true,
            screenshots: true,
            min_heap_headroom: DEFAULT_MIN_HEAP_HEADROOM,
            memory: Arc::new(SystemMemory::new()),
        }
    }
}

impl fmt::Debug for ContainerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerOptions")
            .field("background", &self.background)
            .field("pull_to_refresh", &self.pull_to_refresh)
            .field("screenshots", &self.screenshots)
            .field("min_heap_headroom", &self.min_heap_headroom)
            .finish_non_exhaustive()
    }
}

/// A screen's native view hierarchy around the shared web view.
pub struct ViewContainer {
    pub(super) id: ContainerId,
    pub(super) size: Size,
    pub(super) laid_out: bool,
    pub(super) options: ContainerOptions,
    /// Whether the shared web view is in the web surface region.
    pub(super) web_view_attached: bool,
    pub(super) progress: Option<View>,
    pub(super) error: Option<View>,
    pub(super) screenshot: Option<Screenshot>,
    pub(super) content_refresh: RefreshLayout,
    pub(super) error_refresh: RefreshLayout,
}

impl ViewContainer {
    pub fn new(id: ContainerId, options: ContainerOptions) -> Self {
        Self {
            id,
            size: Size::default(),
            laid_out: false,
            content_refresh: RefreshLayout::new(options.pull_to_refresh),
            error_refresh: RefreshLayout::new(false),
            options,
            web_view_attached: false,
            progress: None,
            error: None,
            screenshot: None,
        }
    }

    // -- Accessors --

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.size)
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    pub fn is_web_view_attached(&self) -> bool {
        self.web_view_attached
    }

    pub fn progress_view(&self) -> Option<&View> {
        self.progress.as_ref()
    }

    pub fn error_view(&self) -> Option<&View> {
        self.error.as_ref()
    }

    pub fn error_view_mut(&mut self) -> Option<&mut View> {
        self.error.as_mut()
    }

    pub fn screenshot(&self) -> Option<&Screenshot> {
        self.screenshot.as_ref()
    }

    pub fn is_progress_visible(&self) -> bool {
        self.progress.is_some()
    }

    pub fn is_error_visible(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_screenshot_visible(&self) -> bool {
        self.screenshot.is_some()
    }

    pub fn is_region_visible(&self, region: Region) -> bool {
        match region {
            Region::WebSurface => self.web_view_attached,
            Region::Progress => self.is_progress_visible(),
            Region::Error => self.is_error_visible(),
            Region::Screenshot => self.is_screenshot_visible(),
        }
    }

    /// The overlay currently drawn over the web surface, if any.
    pub fn visible_overlay(&self) -> Option<Region> {
        Region::ALL
            .into_iter()
            .filter(|r| r.is_overlay())
            .find(|r| self.is_region_visible(*r))
    }

    /// Orientation the visible screenshot was captured in.
    pub fn screenshot_orientation(&self) -> Orientation {
        self.screenshot
            .as_ref()
            .map_or(Orientation::Undefined, |s| s.orientation)
    }

    pub fn content_refresh(&self) -> &RefreshLayout {
        &self.content_refresh
    }

    pub fn error_refresh(&self) -> &RefreshLayout {
        &self.error_refresh
    }
}

impl fmt::Debug for ViewContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContainer")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("laid_out", &self.laid_out)
            .field("web_view_attached", &self.web_view_attached)
            .field("overlay", &self.visible_overlay())
            .finish()
    }
}
