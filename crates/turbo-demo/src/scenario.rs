//! Headless walkthrough of a session against the scripted engine.
//!
//! Exercises a cold boot, an advance visit, a page-proposed visit, a failed
//! visit recovered by pull-to-refresh and a back navigation, logging what
//! the containers show after each step.

use serde_json::json;
use tokio::sync::broadcast;
use turbo_common::{ContainerId, SessionEvent, Size, TurboError};
use turbo_config::TurboConfig;
use turbo_session::{build_host, DefaultDelegate, Session};
use turbo_webview::{ScriptedEngine, ScriptedPage, UiThread, VisitOptions};

const VIEWPORT: Size = Size {
    width: 1080,
    height: 1920,
};

struct Scenario {
    ui: UiThread,
    page: ScriptedPage,
    session: Session,
    events: broadcast::Receiver<SessionEvent>,
    start: String,
}

/// Run the walkthrough from `config.session.start_location`.
pub fn run(config: &TurboConfig) -> Result<(), TurboError> {
    let mut scenario = Scenario::new(config)?;
    scenario.walk()
}

impl Scenario {
    fn new(config: &TurboConfig) -> Result<Self, TurboError> {
        let engine = ScriptedEngine::new();
        let page = engine.page();
        let (ui, _) = UiThread::new(engine);
        let host = build_host(&ui, config)?;
        tracing::info!(
            package = ?host.package_name(),
            version = ?host.version_name(),
            "engine provider"
        );

        let mut session = Session::from_config(config, host, Box::new(DefaultDelegate))?;
        session.resize(VIEWPORT);
        let events = session.subscribe();

        Ok(Self {
            ui,
            page,
            session,
            events,
            start: config.session.start_location.clone(),
        })
    }

    fn walk(&mut self) -> Result<(), TurboError> {
        let root = self.session.navigate(&self.start, VisitOptions::default())?;
        self.settle("cold boot", root);

        let two = self.location("two");
        let second = self.session.navigate(&two, VisitOptions::default())?;
        self.settle("advance", second);

        let three = self.location("three");
        self.page.post_message(
            "visitProposedToLocation",
            json!({ "location": three, "options": { "action": "advance" } }),
        );
        self.pump();
        if let Some(third) = self.session.current_container() {
            self.settle("proposed", third);
        }

        let broken = self.location("broken");
        self.page.fail_location(broken.as_str(), 500);
        let failed = self.session.navigate(&broken, VisitOptions::default())?;
        self.settle("failed visit", failed);

        self.page.clear_failures();
        if self.session.pull_to_refresh()? {
            self.settle("pull to refresh", failed);
        }

        self.log_screenshots();

        while let Some(previous) = self.session.pop()? {
            self.settle("back", previous);
        }

        tracing::info!(
            containers = self.session.container_count(),
            depth = self.session.back_stack().len(),
            "walkthrough finished"
        );
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        format!("{}/{path}", self.start.trim_end_matches('/'))
    }

    fn pump(&mut self) {
        let handled = self.session.run_until_idle(&mut self.ui);
        tracing::debug!(handled, "ui thread idle");
    }

    fn settle(&mut self, step: &str, container: ContainerId) {
        self.pump();
        self.log_events(step);

        let Some(view) = self.session.container(container) else {
            tracing::warn!(step, %container, "container is gone");
            return;
        };
        tracing::info!(
            step,
            %container,
            overlay = ?view.visible_overlay(),
            error = view.error_view().map(|v| v.label()),
            refresh_enabled = view.error_refresh().is_enabled(),
            attached = view.is_web_view_attached(),
            depth = self.session.back_stack().len(),
            "step settled"
        );
    }

    fn log_events(&mut self, step: &str) {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    let json = serde_json::to_string(&event).unwrap_or_default();
                    tracing::debug!(step, event = %json, "session event");
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(step, skipped, "session events dropped");
                }
                Err(_) => break,
            }
        }
    }

    fn log_screenshots(&self) {
        for entry in self.session.back_stack() {
            let Some(screenshot) = &entry.screenshot else {
                continue;
            };
            match screenshot.bitmap.to_png() {
                Ok(png) => tracing::info!(
                    location = %entry.location,
                    width = screenshot.bitmap.width(),
                    height = screenshot.bitmap.height(),
                    png_bytes = png.len(),
                    "stored screenshot"
                ),
                Err(e) => tracing::warn!(location = %entry.location, error = %e, "screenshot encode failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkthrough_unwinds_to_root() {
        let mut config = TurboConfig::default();
        config.session.start_location = "https://demo.test/".to_string();
        let mut scenario = Scenario::new(&config).unwrap();
        scenario.walk().unwrap();

        assert_eq!(scenario.session.back_stack().len(), 1);
        assert_eq!(scenario.session.container_count(), 1);
        assert_eq!(
            scenario.session.current_entry().unwrap().location,
            "https://demo.test/"
        );
    }

    #[test]
    fn location_joins_paths() {
        let mut config = TurboConfig::default();
        config.session.start_location = "http://localhost:3000/".to_string();
        let scenario = Scenario::new(&config).unwrap();
        assert_eq!(scenario.location("two"), "http://localhost:3000/two");
    }
}
