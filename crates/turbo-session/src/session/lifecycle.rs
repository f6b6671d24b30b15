//! Reactions to engine events and bridge messages.

use tracing::{debug, info, warn};
use turbo_common::{SessionEvent, VisitIdentifier};
use turbo_config::Presentation;
use turbo_webview::{BridgeMessage, EngineEvent, PageLoadState, UiThread, VisitAction, VisitOptions};

use super::types::{ActiveVisit, Session};

/// Upper bound on pump rounds in [`Session::run_until_idle`].
const MAX_PUMP_ROUNDS: usize = 256;

impl Session {
    /// Pump `ui` and feed its events back into the session until neither
    /// has anything left. Returns the number of engine events handled.
    pub fn run_until_idle(&mut self, ui: &mut UiThread) -> usize {
        let mut handled = 0;
        for _ in 0..MAX_PUMP_ROUNDS {
            let tasks = ui.run_pending();
            let events = ui.drain_events();
            if tasks == 0 && events.is_empty() {
                return handled;
            }
            for event in events {
                self.handle_engine_event(event);
                handled += 1;
            }
        }
        warn!(rounds = MAX_PUMP_ROUNDS, "UI thread still busy, yielding");
        handled
    }

    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::PageLoad {
                state: PageLoadState::Started,
                url,
            } => {
                debug!(url = %url, "page load started");
                self.ready = false;
            }
            EngineEvent::PageLoad {
                state: PageLoadState::Finished,
                url,
            } => {
                debug!(url = %url, "page load finished");
                self.host.install_bridge(
                    Box::new(|| info!(event = "ReInstallBridge", method = "pageLoad")),
                    Box::new(|| {}),
                );
            }
            EngineEvent::Message { body } => match BridgeMessage::parse(&body) {
                Ok(message) => self.handle_message(message),
                Err(e) => warn!(error = %e, "dropping bridge message"),
            },
        }
    }

    pub fn handle_message(&mut self, message: BridgeMessage) {
        match message {
            BridgeMessage::VisitProposedToLocation { location, options } => {
                self.visit_proposed(&location, options)
            }
            BridgeMessage::VisitStarted {
                visit_identifier,
                visit_has_cached_snapshot,
                location,
            } => self.visit_started(visit_identifier, visit_has_cached_snapshot, &location),
            BridgeMessage::VisitRequestCompleted { visit_identifier } => {
                debug!(visit = %visit_identifier, "visit request completed");
            }
            BridgeMessage::VisitRequestFailedWithStatusCode {
                visit_identifier,
                visit_has_cached_snapshot,
                status_code,
            } => self.visit_request_failed(&visit_identifier, visit_has_cached_snapshot, status_code),
            BridgeMessage::VisitRequestFinished { visit_identifier } => {
                self.visit_request_finished(&visit_identifier)
            }
            BridgeMessage::PageLoaded {
                restoration_identifier,
            } => self.page_loaded(restoration_identifier),
            BridgeMessage::VisitRendered { visit_identifier } => {
                self.visit_rendered(&visit_identifier)
            }
            BridgeMessage::VisitCompleted {
                visit_identifier,
                restoration_identifier,
            } => self.visit_completed(&visit_identifier, restoration_identifier),
            BridgeMessage::PageInvalidated => self.page_invalidated(),
            BridgeMessage::TurboIsReady { is_ready } => self.turbo_is_ready(is_ready),
            BridgeMessage::TurboFailedToLoad => self.turbo_failed_to_load(),
            BridgeMessage::ScrollChanged { scroll_y } => self.host.set_scroll_y(scroll_y),
            BridgeMessage::Unknown(kind) => debug!(kind = %kind, "ignoring bridge message"),
        }
    }

    /// The in-flight visit, if `visit_identifier` belongs to it.
    fn matching_visit(&self, visit_identifier: &str) -> Option<&ActiveVisit> {
        self.active.as_ref().filter(|visit| {
            visit.page_identifier.as_deref() == Some(visit_identifier)
                || visit
                    .cold_boot
                    .as_ref()
                    .is_some_and(|id| id.as_str() == visit_identifier)
        })
    }

    fn visit_proposed(&mut self, location: &str, options: VisitOptions) {
        let destination = self.registry.resolve(location);
        if self.delegate.visit_proposed(location, &options, &destination) {
            debug!(location, "proposal handled by delegate");
            return;
        }
        let result = match destination.presentation {
            Presentation::None => {
                debug!(location, "proposal ignored");
                Ok(())
            }
            Presentation::Replace => self.replace(location, options),
            _ if options.action == VisitAction::Replace => self.replace(location, options),
            Presentation::Push | Presentation::Modal | Presentation::BottomSheet => {
                self.navigate(location, options).map(|_| ())
            }
        };
        if let Err(e) = result {
            warn!(location, error = %e, "proposed visit failed");
        }
    }

    fn visit_started(&mut self, visit_identifier: String, has_cached_snapshot: bool, location: &str) {
        let Some(visit) = self.active.as_mut() else {
            warn!(visit = %visit_identifier, "visit started with no visit in flight");
            return;
        };
        if visit.cold_boot.is_some() {
            warn!(visit = %visit_identifier, "visit started during cold boot");
            return;
        }
        if let Some(current) = visit
            .page_identifier
            .as_ref()
            .filter(|current| **current != visit_identifier)
        {
            warn!(visit = %visit_identifier, current = %current, "visit started for another visit");
            return;
        }
        visit.page_identifier = Some(visit_identifier.clone());
        let container = visit.container;
        debug!(%container, visit = %visit_identifier, has_cached_snapshot, "visit started");

        if !has_cached_snapshot {
            let progress = self.delegate.create_progress_view(location);
            if let Some(target) = self.containers.get_mut(&container) {
                target.add_progress_view(progress);
            }
        }
        self.publish(SessionEvent::VisitStarted {
            container,
            location: location.to_string(),
        });
    }

    fn visit_request_failed(
        &mut self,
        visit_identifier: &str,
        has_cached_snapshot: bool,
        status_code: i32,
    ) {
        let Some(visit) = self.matching_visit(visit_identifier).cloned() else {
            warn!(visit = visit_identifier, status_code, "failure for unknown visit");
            return;
        };
        if let Some(active) = self.active.as_mut() {
            active.failed = true;
        }
        warn!(container = %visit.container, location = %visit.location, status_code, "visit request failed");

        let error = (!has_cached_snapshot)
            .then(|| self.delegate.create_error_view(&visit.location, status_code));
        if let Some(target) = self.containers.get_mut(&visit.container) {
            target.finish_refresh();
            target.remove_progress_view();
            if let Some(error) = error {
                target.add_error_view(error);
            }
        }
        self.delegate
            .visit_failed(visit.container, &visit.location, status_code);
        self.publish(SessionEvent::VisitFailed {
            container: visit.container,
            location: visit.location,
            status_code,
        });
    }

    fn visit_request_finished(&mut self, visit_identifier: &str) {
        if self
            .matching_visit(visit_identifier)
            .is_some_and(|visit| visit.failed)
        {
            self.active = None;
        }
    }

    fn page_loaded(&mut self, restoration_identifier: String) {
        let container = self
            .active
            .as_ref()
            .map(|visit| visit.container)
            .or_else(|| self.current_container());
        debug!(restoration = %restoration_identifier, "page loaded");
        if let Some(entry) = container.and_then(|c| self.entry_mut(c)) {
            entry.restoration_identifier = VisitIdentifier::from(restoration_identifier);
        }
    }

    fn turbo_is_ready(&mut self, is_ready: bool) {
        self.ready = is_ready;
        if !is_ready {
            debug!("turbo not ready on this page");
            return;
        }
        if let Some(identifier) = self.active.as_ref().and_then(|v| v.cold_boot.clone()) {
            self.host.visit_rendered_for_cold_boot(&identifier);
        }
    }

    fn visit_rendered(&mut self, visit_identifier: &str) {
        let Some(visit) = self.matching_visit(visit_identifier).cloned() else {
            debug!(visit = visit_identifier, "render of a visit no longer tracked");
            return;
        };
        if let Some(target) = self.containers.get_mut(&visit.container) {
            target.remove_progress_view();
            target.remove_screenshot();
            target.remove_error_view();
            target.finish_refresh();
        }
        if let Some(entry) = self.entry_mut(visit.container) {
            entry.screenshot = None;
        }
        debug!(container = %visit.container, location = %visit.location, "visit rendered");
        self.publish(SessionEvent::VisitRendered {
            container: visit.container,
            location: visit.location.clone(),
        });

        if visit.cold_boot.is_some() {
            let restoration = self
                .entry_mut(visit.container)
                .map(|e| e.restoration_identifier.clone())
                .unwrap_or_default();
            self.complete(&visit, restoration);
        }
    }

    fn visit_completed(&mut self, visit_identifier: &str, restoration_identifier: String) {
        let Some(visit) = self.matching_visit(visit_identifier).cloned() else {
            debug!(visit = visit_identifier, "completion of a visit no longer tracked");
            return;
        };
        let restoration = VisitIdentifier::from(restoration_identifier);
        if let Some(entry) = self.entry_mut(visit.container) {
            entry.restoration_identifier = restoration.clone();
        }
        self.complete(&visit, restoration);
    }

    fn complete(&mut self, visit: &ActiveVisit, restoration: VisitIdentifier) {
        self.active = None;
        info!(container = %visit.container, location = %visit.location, "visit completed");
        self.delegate.visit_completed(visit.container, &visit.location);
        self.publish(SessionEvent::VisitCompleted {
            container: visit.container,
            location: visit.location.clone(),
            restoration_identifier: restoration.as_str().to_string(),
        });
    }

    fn page_invalidated(&mut self) {
        info!("page invalidated, reloading");
        self.ready = false;
        self.publish(SessionEvent::PageInvalidated);
        if let Some(entry) = self.current_entry().cloned() {
            self.cold_boot(entry.container, &entry.location);
        }
    }

    fn turbo_failed_to_load(&mut self) {
        self.ready = false;
        let visit = self.active.take();
        let container = visit
            .as_ref()
            .map(|v| v.container)
            .or_else(|| self.current_container());
        let location = visit
            .map(|v| v.location)
            .or_else(|| self.current_entry().map(|e| e.location.clone()))
            .unwrap_or_default();
        warn!(location = %location, "turbo failed to load");

        if let Some(target) = container.and_then(|c| self.containers.get_mut(&c)) {
            target.remove_progress_view();
            target.finish_refresh();
        }
        self.delegate.turbo_failed_to_load(&location);
        self.publish(SessionEvent::TurboFailedToLoad);
    }
}
