//! Headless engine that simulates a Turbo page.
//!
//! `ScriptedEngine` records every script it is asked to evaluate and plays
//! the page's side of the bridge: it answers the presence probe, "installs"
//! the bridge when the bridge script is evaluated, and answers visit
//! commands with the lifecycle messages a Turbo page would post back. Tests
//! and the demo binary observe and steer it through a [`ScriptedPage`].

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{json, Value};
use turbo_common::Color;

use super::{EngineEvent, EngineProvider, PageLoadState, ScriptCallback, ScriptEngine, WebSettings};
use crate::bridge::BRIDGE_ABSENT_PROBE;

/// Statement in the bridge script that creates the global bridge object.
pub const BRIDGE_INSTALL_MARKER: &str = "window.turboNative = new TurboNative()";

const VISIT_CALL: &str = "turboNative.visitLocationWithOptionsAndRestorationIdentifier(";
const COLD_BOOT_CALL: &str = "turboNative.visitRenderedForColdBoot(";

struct PageState {
    responsive: bool,
    turbo_available: bool,
    bridge_installed: bool,
    current_url: Option<String>,
    settings: Option<WebSettings>,
    background: Option<Color>,
    provider: Option<EngineProvider>,
    scripts: Vec<String>,
    stalled: Vec<ScriptCallback>,
    events: Vec<EngineEvent>,
    failures: HashMap<String, i32>,
    snapshots: HashSet<String>,
    next_identifier: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            responsive: true,
            turbo_available: true,
            bridge_installed: false,
            current_url: None,
            settings: None,
            background: None,
            provider: Some(EngineProvider {
                package_name: "turbo.scripted".to_string(),
                version_name: Some("120.0.6099.43".to_string()),
            }),
            scripts: Vec::new(),
            stalled: Vec::new(),
            events: Vec::new(),
            failures: HashMap::new(),
            snapshots: HashSet::new(),
            next_identifier: 1,
        }
    }
}

impl PageState {
    fn identifier(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_identifier);
        self.next_identifier += 1;
        id
    }

    fn post(&mut self, kind: &str, payload: Value) {
        let body = json!({ "kind": kind, "payload": payload }).to_string();
        self.events.push(EngineEvent::Message { body });
    }

    fn respond(&mut self, script: &str) -> Option<String> {
        let script = script.trim();

        if script == BRIDGE_ABSENT_PROBE {
            return Some((!self.bridge_installed).to_string());
        }

        if script.contains(BRIDGE_INSTALL_MARKER) {
            self.install_bridge();
            return None;
        }

        if let Some(args) = call_arguments(script, VISIT_CALL) {
            if self.bridge_installed {
                self.visit(args);
            }
            return None;
        }

        if let Some(args) = call_arguments(script, COLD_BOOT_CALL) {
            if self.bridge_installed {
                let identifier = args.trim_matches('\'').to_string();
                self.post("visitRendered", json!({ "visitIdentifier": identifier }));
            }
            return None;
        }

        None
    }

    fn install_bridge(&mut self) {
        self.bridge_installed = true;
        if self.turbo_available {
            let restoration = self.identifier("restoration");
            self.post(
                "pageLoaded",
                json!({ "restorationIdentifier": restoration }),
            );
            self.post("turboIsReady", json!({ "isReady": true }));
        } else {
            self.post("turboIsReady", json!({ "isReady": false }));
            self.post("turboFailedToLoad", Value::Null);
        }
    }

    fn visit(&mut self, args: &str) {
        let Ok(values) = serde_json::from_str::<Vec<Value>>(&format!("[{args}]")) else {
            return;
        };
        let location = values
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let action = values
            .get(1)
            .and_then(Value::as_str)
            .and_then(|options| serde_json::from_str::<Value>(options).ok())
            .and_then(|options| options.get("action").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| "advance".to_string());
        let restoration = values
            .get(2)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let visit = self.identifier("visit");
        let cached = self.snapshots.contains(&location);
        self.post(
            "visitStarted",
            json!({
                "visitIdentifier": visit,
                "visitHasCachedSnapshot": cached,
                "location": location,
            }),
        );

        if let Some(status) = self.failures.get(&location).copied() {
            self.post(
                "visitRequestFailedWithStatusCode",
                json!({
                    "visitIdentifier": visit,
                    "visitHasCachedSnapshot": cached,
                    "statusCode": status,
                }),
            );
            self.post("visitRequestFinished", json!({ "visitIdentifier": visit }));
            return;
        }

        let restoration = if action == "restore" && !restoration.is_empty() {
            restoration
        } else {
            self.identifier("restoration")
        };

        self.post("visitRequestCompleted", json!({ "visitIdentifier": visit }));
        self.post("visitRequestFinished", json!({ "visitIdentifier": visit }));
        self.post("visitRendered", json!({ "visitIdentifier": visit }));
        self.post(
            "visitCompleted",
            json!({
                "visitIdentifier": visit,
                "restorationIdentifier": restoration,
            }),
        );
        self.snapshots.insert(location.clone());
        self.current_url = Some(location);
    }
}

/// Argument text of `prefix(...)` if `script` is exactly that call.
fn call_arguments<'a>(script: &'a str, prefix: &str) -> Option<&'a str> {
    script
        .strip_prefix(prefix)?
        .trim_end_matches(';')
        .strip_suffix(')')
}

/// Observation and control handle for a [`ScriptedEngine`]'s page.
#[derive(Clone)]
pub struct ScriptedPage(Arc<Mutex<PageState>>);

impl ScriptedPage {
    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// When unresponsive, evaluations are recorded but never completed.
    pub fn set_responsive(&self, responsive: bool) {
        self.lock().responsive = responsive;
    }

    /// Whether the page runs Turbo; without it the bridge reports failure.
    pub fn set_turbo_available(&self, available: bool) {
        self.lock().turbo_available = available;
    }

    pub fn set_provider(&self, provider: Option<EngineProvider>) {
        self.lock().provider = provider;
    }

    pub fn set_bridge_installed(&self, installed: bool) {
        self.lock().bridge_installed = installed;
    }

    /// Make visits to `location` fail with `status_code`.
    pub fn fail_location(&self, location: impl Into<String>, status_code: i32) {
        self.lock().failures.insert(location.into(), status_code);
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Post a raw bridge message as the page would.
    pub fn post_message(&self, kind: &str, payload: Value) {
        self.lock().post(kind, payload);
    }

    pub fn bridge_installed(&self) -> bool {
        self.lock().bridge_installed
    }

    pub fn scripts(&self) -> Vec<String> {
        self.lock().scripts.clone()
    }

    pub fn clear_scripts(&self) {
        self.lock().scripts.clear();
    }

    pub fn current_url(&self) -> Option<String> {
        self.lock().current_url.clone()
    }

    pub fn settings(&self) -> Option<WebSettings> {
        self.lock().settings.clone()
    }

    pub fn background(&self) -> Option<Color> {
        self.lock().background
    }

    pub fn stalled_count(&self) -> usize {
        self.lock().stalled.len()
    }
}

/// Headless [`ScriptEngine`] backed by a simulated page.
pub struct ScriptedEngine {
    page: ScriptedPage,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            page: ScriptedPage(Arc::new(Mutex::new(PageState::default()))),
        }
    }

    pub fn page(&self) -> ScriptedPage {
        self.page.clone()
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEngine for ScriptedEngine {
    fn apply_settings(&mut self, settings: &WebSettings) {
        self.page.lock().settings = Some(settings.clone());
    }

    fn evaluate(&mut self, script: &str, on_complete: ScriptCallback) {
        let mut state = self.page.lock();
        state.scripts.push(script.to_string());
        if !state.responsive {
            state.stalled.push(on_complete);
            return;
        }
        let result = state.respond(script);
        drop(state);
        on_complete(result);
    }

    fn load_url(&mut self, url: &str) {
        let mut state = self.page.lock();
        state.bridge_installed = false;
        state.current_url = Some(url.to_string());
        state.events.push(EngineEvent::PageLoad {
            state: PageLoadState::Started,
            url: url.to_string(),
        });
        state.events.push(EngineEvent::PageLoad {
            state: PageLoadState::Finished,
            url: url.to_string(),
        });
    }

    fn set_background(&mut self, color: Color) {
        self.page.lock().background = Some(color);
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.page.lock().events)
    }

    fn provider(&self) -> Option<EngineProvider> {
        self.page.lock().provider.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(engine: &mut ScriptedEngine, script: &str) -> Option<String> {
        let result = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&result);
        engine.evaluate(script, Box::new(move |r| *sink.lock().unwrap() = r));
        let value = result.lock().unwrap().take();
        value
    }

    fn message_kinds(engine: &mut ScriptedEngine) -> Vec<String> {
        engine
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::Message { body } => {
                    let v: Value = serde_json::from_str(&body).unwrap();
                    Some(v["kind"].as_str().unwrap().to_string())
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn probe_reflects_bridge_presence() {
        let mut engine = ScriptedEngine::new();
        assert_eq!(evaluate(&mut engine, BRIDGE_ABSENT_PROBE).as_deref(), Some("true"));
        engine.page().set_bridge_installed(true);
        assert_eq!(evaluate(&mut engine, BRIDGE_ABSENT_PROBE).as_deref(), Some("false"));
    }

    #[test]
    fn load_url_wipes_bridge() {
        let mut engine = ScriptedEngine::new();
        engine.page().set_bridge_installed(true);
        engine.load_url("https://example.com");
        assert!(!engine.page().bridge_installed());
        let events = engine.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            EngineEvent::PageLoad { state: PageLoadState::Finished, url } if url == "https://example.com"
        ));
    }

    #[test]
    fn installing_bridge_reports_ready() {
        let mut engine = ScriptedEngine::new();
        evaluate(&mut engine, BRIDGE_INSTALL_MARKER);
        assert!(engine.page().bridge_installed());
        assert_eq!(message_kinds(&mut engine), vec!["pageLoaded", "turboIsReady"]);
    }

    #[test]
    fn installing_bridge_without_turbo_reports_failure() {
        let mut engine = ScriptedEngine::new();
        engine.page().set_turbo_available(false);
        evaluate(&mut engine, BRIDGE_INSTALL_MARKER);
        assert_eq!(
            message_kinds(&mut engine),
            vec!["turboIsReady", "turboFailedToLoad"]
        );
    }

    #[test]
    fn visit_command_plays_full_lifecycle() {
        let mut engine = ScriptedEngine::new();
        engine.page().set_bridge_installed(true);
        evaluate(
            &mut engine,
            r#"turboNative.visitLocationWithOptionsAndRestorationIdentifier("https://example.com/a","{\"action\":\"advance\"}","")"#,
        );
        assert_eq!(
            message_kinds(&mut engine),
            vec![
                "visitStarted",
                "visitRequestCompleted",
                "visitRequestFinished",
                "visitRendered",
                "visitCompleted"
            ]
        );
        assert_eq!(
            engine.page().current_url().as_deref(),
            Some("https://example.com/a")
        );
    }

    #[test]
    fn failing_location_reports_status() {
        let mut engine = ScriptedEngine::new();
        engine.page().set_bridge_installed(true);
        engine.page().fail_location("https://example.com/broken", 500);
        evaluate(
            &mut engine,
            r#"turboNative.visitLocationWithOptionsAndRestorationIdentifier("https://example.com/broken","{\"action\":\"advance\"}","")"#,
        );
        assert_eq!(
            message_kinds(&mut engine),
            vec![
                "visitStarted",
                "visitRequestFailedWithStatusCode",
                "visitRequestFinished"
            ]
        );
    }

    #[test]
    fn visit_without_bridge_does_nothing() {
        let mut engine = ScriptedEngine::new();
        evaluate(
            &mut engine,
            r#"turboNative.visitLocationWithOptionsAndRestorationIdentifier("https://example.com","{}","")"#,
        );
        assert!(message_kinds(&mut engine).is_empty());
    }

    #[test]
    fn cold_boot_render_echoes_identifier() {
        let mut engine = ScriptedEngine::new();
        engine.page().set_bridge_installed(true);
        evaluate(&mut engine, "turboNative.visitRenderedForColdBoot('cold-1')");
        let events = engine.drain_events();
        let EngineEvent::Message { body } = &events[0] else {
            panic!("expected message");
        };
        assert!(body.contains("\"visitIdentifier\":\"cold-1\""));
    }

    #[test]
    fn provider_can_be_removed() {
        let engine = ScriptedEngine::new();
        assert!(engine.provider().is_some());
        engine.page().set_provider(None);
        assert!(engine.provider().is_none());
    }
}
