//! Host hooks into the session.

use turbo_common::ContainerId;
use turbo_view::View;
use turbo_webview::VisitOptions;

use crate::destinations::Destination;

/// Callbacks from the session to the embedding app.
///
/// Every method has a default so hosts implement only what they need.
pub trait SessionDelegate {
    /// A fresh, unparented view for the progress region.
    fn create_progress_view(&mut self, location: &str) -> View {
        let _ = location;
        View::new("progress")
    }

    /// A fresh, unparented view describing a failed request.
    fn create_error_view(&mut self, location: &str, status_code: i32) -> View {
        let _ = location;
        View::new(format!("error {status_code}"))
    }

    /// The page proposed a visit. Return `true` to handle it here instead of
    /// letting the session route it by `destination.presentation`.
    fn visit_proposed(
        &mut self,
        location: &str,
        options: &VisitOptions,
        destination: &Destination,
    ) -> bool {
        let _ = (location, options, destination);
        false
    }

    fn visit_completed(&mut self, container: ContainerId, location: &str) {
        let _ = (container, location);
    }

    fn visit_failed(&mut self, container: ContainerId, location: &str, status_code: i32) {
        let _ = (container, location, status_code);
    }

    /// The page does not run Turbo, or the bridge could not register.
    fn turbo_failed_to_load(&mut self, location: &str) {
        let _ = location;
    }
}

/// Delegate that accepts every default.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDelegate;

impl SessionDelegate for DefaultDelegate {}
