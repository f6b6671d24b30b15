//! Native overlay views.

use turbo_common::{ContainerId, ViewId};

/// A native view placed into a container region.
///
/// `parent` is the ownership tag: a view belongs to at most one container
/// at a time, and containers refuse views that are still tagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    id: ViewId,
    label: String,
    parent: Option<ContainerId>,
    scroll_y: i32,
}

impl View {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: ViewId::next(),
            label: label.into(),
            parent: None,
            scroll_y: 0,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Vertical scroll offset of the view's scrollable content.
    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, scroll_y: i32) {
        self.scroll_y = scroll_y;
    }

    pub(crate) fn adopt(&mut self, parent: ContainerId) {
        self.parent = Some(parent);
    }

    pub(crate) fn release(mut self) -> Self {
        self.parent = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_views_are_unparented_and_unique() {
        let a = View::new("progress");
        let b = View::new("progress");
        assert!(!a.has_parent());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.label(), "progress");
    }

    #[test]
    fn adopt_and_release_toggle_the_tag() {
        let mut view = View::new("error");
        view.adopt(ContainerId(3));
        assert_eq!(view.parent(), Some(ContainerId(3)));
        let view = view.release();
        assert!(!view.has_parent());
    }
}
