//! UI-thread dispatcher.
//!
//! All script execution happens on one thread. Callers on any thread hold a
//! cloneable [`ScriptRunner`] that queues commands; the thread owning the
//! [`UiThread`] executes them when it pumps the queue. Engine completions
//! are queued again rather than invoked in place, so every callback runs on
//! the UI thread after the work already queued ahead of it.

use tokio::sync::{mpsc, oneshot};
use tracing::trace;
use turbo_common::Color;

use crate::engine::{EngineEvent, EngineProvider, ScriptCallback, ScriptEngine, WebSettings};

enum UiTask {
    Configure(WebSettings),
    Evaluate {
        script: String,
        on_complete: ScriptCallback,
    },
    LoadUrl(String),
    SetBackground(Color),
    Complete {
        on_complete: ScriptCallback,
        result: Option<String>,
    },
}

/// Owner of the engine and the command queue.
pub struct UiThread {
    engine: Box<dyn ScriptEngine>,
    tx: mpsc::UnboundedSender<UiTask>,
    rx: mpsc::UnboundedReceiver<UiTask>,
}

impl UiThread {
    /// Take ownership of `engine` and return the thread with a runner bound to it.
    pub fn new(engine: impl ScriptEngine + 'static) -> (Self, ScriptRunner) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = ScriptRunner { tx: tx.clone() };
        let thread = Self {
            engine: Box::new(engine),
            tx,
            rx,
        };
        (thread, runner)
    }

    /// Another runner bound to this thread.
    pub fn runner(&self) -> ScriptRunner {
        ScriptRunner {
            tx: self.tx.clone(),
        }
    }

    /// Engine provider, or `None` when the engine cannot report one.
    pub fn provider(&self) -> Option<EngineProvider> {
        self.engine.provider()
    }

    /// Execute queued tasks until the queue is empty, including tasks queued
    /// while pumping. Returns the number of tasks executed.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(task) = self.rx.try_recv() {
            self.execute(task);
            count += 1;
        }
        count
    }

    /// Take the engine's pending page and message events.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.engine.drain_events()
    }

    fn execute(&mut self, task: UiTask) {
        match task {
            UiTask::Configure(settings) => self.engine.apply_settings(&settings),
            UiTask::Evaluate {
                script,
                on_complete,
            } => {
                trace!(len = script.len(), "evaluating script");
                let tx = self.tx.clone();
                self.engine.evaluate(
                    &script,
                    Box::new(move |result| {
                        // The receiver lives as long as the UiThread; a send
                        // after shutdown has nobody left to notify.
                        let _ = tx.send(UiTask::Complete {
                            on_complete,
                            result,
                        });
                    }),
                );
            }
            UiTask::LoadUrl(url) => self.engine.load_url(&url),
            UiTask::SetBackground(color) => self.engine.set_background(color),
            UiTask::Complete {
                on_complete,
                result,
            } => on_complete(result),
        }
    }
}

/// Cloneable, `Send` handle that queues work for the UI thread.
#[derive(Clone)]
pub struct ScriptRunner {
    tx: mpsc::UnboundedSender<UiTask>,
}

impl ScriptRunner {
    /// Queue `script` for evaluation; `on_complete` runs on the UI thread.
    pub fn run_javascript<F>(&self, script: impl Into<String>, on_complete: F)
    where
        F: FnOnce(Option<String>) + Send + 'static,
    {
        self.send(UiTask::Evaluate {
            script: script.into(),
            on_complete: Box::new(on_complete),
        });
    }

    /// Queue `script` for evaluation and return a receiver for its result.
    ///
    /// Dropping the receiver is how a caller stops caring: the evaluation
    /// still runs and its result is discarded.
    pub fn evaluate(&self, script: impl Into<String>) -> oneshot::Receiver<Option<String>> {
        let (tx, rx) = oneshot::channel();
        self.run_javascript(script, move |result| {
            let _ = tx.send(result);
        });
        rx
    }

    /// Queue a full page load.
    pub fn load_url(&self, url: impl Into<String>) {
        self.send(UiTask::LoadUrl(url.into()));
    }

    pub(crate) fn configure(&self, settings: WebSettings) {
        self.send(UiTask::Configure(settings));
    }

    pub(crate) fn set_background(&self, color: Color) {
        self.send(UiTask::SetBackground(color));
    }

    fn send(&self, task: UiTask) {
        if self.tx.send(task).is_err() {
            tracing::warn!("UI thread is gone, dropping task");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scripted::ScriptedEngine;
    use std::sync::{Arc, Mutex};

    #[test]
    fn nothing_runs_until_pumped() {
        let engine = ScriptedEngine::new();
        let page = engine.page();
        let (mut ui, runner) = UiThread::new(engine);

        let done = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&done);
        runner.run_javascript("1 + 1", move |r| *sink.lock().unwrap() = Some(r));

        assert!(page.scripts().is_empty());
        assert!(done.lock().unwrap().is_none());

        // Evaluate, then the queued completion.
        assert_eq!(ui.run_pending(), 2);
        assert_eq!(page.scripts(), vec!["1 + 1".to_string()]);
        assert!(done.lock().unwrap().is_some());
    }

    #[test]
    fn completions_run_after_already_queued_work() {
        let engine = ScriptedEngine::new();
        let (mut ui, runner) = UiThread::new(engine);
        let order = Arc::new(Mutex::new(Vec::new()));

        let o = Arc::clone(&order);
        runner.run_javascript("first", move |_| o.lock().unwrap().push("first done"));
        let o = Arc::clone(&order);
        runner.run_javascript("second", move |_| o.lock().unwrap().push("second done"));

        ui.run_pending();
        assert_eq!(*order.lock().unwrap(), vec!["first done", "second done"]);
    }

    #[test]
    fn runner_is_usable_from_other_threads() {
        let engine = ScriptedEngine::new();
        let page = engine.page();
        let (mut ui, runner) = UiThread::new(engine);

        std::thread::spawn(move || runner.run_javascript("from worker", |_| {}))
            .join()
            .unwrap();

        ui.run_pending();
        assert_eq!(page.scripts(), vec!["from worker".to_string()]);
    }

    #[tokio::test]
    async fn evaluate_resolves_after_pump() {
        let engine = ScriptedEngine::new();
        let (mut ui, runner) = UiThread::new(engine);

        let rx = runner.evaluate("window.turboNative == null");
        ui.run_pending();
        assert_eq!(rx.await.unwrap(), Some("true".to_string()));
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let engine = ScriptedEngine::new();
        let (mut ui, runner) = UiThread::new(engine);

        drop(runner.evaluate("ignored"));
        assert_eq!(ui.run_pending(), 2);
    }

    #[test]
    fn stalled_engine_never_completes() {
        let engine = ScriptedEngine::new();
        let page = engine.page();
        page.set_responsive(false);
        let (mut ui, runner) = UiThread::new(engine);

        let fired = Arc::new(Mutex::new(false));
        let f = Arc::clone(&fired);
        runner.run_javascript("hang", move |_| *f.lock().unwrap() = true);

        assert_eq!(ui.run_pending(), 1);
        assert!(!*fired.lock().unwrap());
        assert_eq!(page.stalled_count(), 1);
    }

    #[test]
    fn configure_and_load_url_reach_engine() {
        let engine = ScriptedEngine::new();
        let page = engine.page();
        let (mut ui, runner) = UiThread::new(engine);

        runner.configure(WebSettings::default());
        runner.load_url("https://example.com");
        ui.run_pending();

        assert!(page.settings().is_some());
        assert_eq!(page.current_url().as_deref(), Some("https://example.com"));
    }
}
