//! Pull-to-refresh state for a container region.

/// A swipe-to-refresh wrapper around one scrollable child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshLayout {
    enabled: bool,
    refreshing: bool,
}

impl RefreshLayout {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            refreshing: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Disabling also stops an indicator that is showing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.refreshing = false;
        }
    }

    pub fn set_refreshing(&mut self, refreshing: bool) {
        self.refreshing = refreshing && self.enabled;
    }

    /// A child scrolled away from the top consumes the gesture itself.
    pub fn can_child_scroll_up(scroll_y: i32) -> bool {
        scroll_y > 0
    }

    /// Start refreshing if the gesture may trigger it. Returns whether it did.
    pub fn pull(&mut self, child_scroll_y: i32) -> bool {
        if !self.enabled || self.refreshing || Self::can_child_scroll_up(child_scroll_y) {
            return false;
        }
        self.refreshing = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_at_top_starts_refresh() {
        let mut layout = RefreshLayout::new(true);
        assert!(layout.pull(0));
        assert!(layout.is_refreshing());
        assert!(!layout.pull(0));
    }

    #[test]
    fn scrolled_child_blocks_pull() {
        let mut layout = RefreshLayout::new(true);
        assert!(RefreshLayout::can_child_scroll_up(12));
        assert!(!layout.pull(12));
        assert!(!layout.is_refreshing());
    }

    #[test]
    fn disabled_layout_never_refreshes() {
        let mut layout = RefreshLayout::new(false);
        assert!(!layout.pull(0));
        layout.set_refreshing(true);
        assert!(!layout.is_refreshing());
    }

    #[test]
    fn disabling_stops_indicator() {
        let mut layout = RefreshLayout::new(true);
        layout.pull(0);
        layout.set_enabled(false);
        assert!(!layout.is_refreshing());
        assert!(!layout.is_enabled());
    }
}
