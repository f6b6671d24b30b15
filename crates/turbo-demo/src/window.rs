//! Native window front end: a real web view driven by the session.
//!
//! Keys: `Escape`/`Backspace` go back, `F5` refreshes, `Home` clears the
//! back stack.

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use turbo_common::{Size, TurboError};
use turbo_config::TurboConfig;
use turbo_session::{build_host, web_settings, DefaultDelegate, Session};
use turbo_webview::{UiThread, VisitOptions, WryEngine};

/// Web view, UI thread and session live as long as the window.
struct Live {
    // Declared first so the web view drops before its window.
    ui: UiThread,
    session: Session,
    window: Window,
}

pub struct TurboWindowApp {
    config: TurboConfig,
    live: Option<Live>,
    should_exit: bool,
}

impl TurboWindowApp {
    pub fn new(config: TurboConfig) -> Self {
        Self {
            config,
            live: None,
            should_exit: false,
        }
    }

    fn open(&self, event_loop: &ActiveEventLoop) -> Result<Live, TurboError> {
        let attrs = WindowAttributes::default()
            .with_title("turbo-demo")
            .with_inner_size(LogicalSize::new(480.0, 860.0));
        let window = event_loop
            .create_window(attrs)
            .map_err(|e| TurboError::Engine(e.to_string()))?;

        let engine = WryEngine::build(&window, "about:blank", web_settings(&self.config))
            .map_err(|e| TurboError::Engine(e.to_string()))?;
        let (ui, _) = UiThread::new(engine);
        let host = build_host(&ui, &self.config)?;

        let mut session = Session::from_config(&self.config, host, Box::new(DefaultDelegate))?;
        session.resize(to_size(window.inner_size()));
        session.navigate(&self.config.session.start_location, VisitOptions::default())?;

        Ok(Live {
            ui,
            session,
            window,
        })
    }

    fn handle_key(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        let Some(live) = self.live.as_mut() else {
            return;
        };
        let result = match event.logical_key {
            Key::Named(NamedKey::Escape | NamedKey::Backspace) => live.session.pop().map(drop),
            Key::Named(NamedKey::F5) => live.session.refresh(),
            Key::Named(NamedKey::Home) => live.session.clear_back_stack().map(drop),
            _ => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "navigation key failed");
        }
    }
}

fn to_size(size: PhysicalSize<u32>) -> Size {
    Size::new(
        i32::try_from(size.width).unwrap_or(i32::MAX),
        i32::try_from(size.height).unwrap_or(i32::MAX),
    )
}

impl ApplicationHandler for TurboWindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.live.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(live) => {
                tracing::info!(
                    package = ?live.session.host().package_name(),
                    version = ?live.session.host().version_name(),
                    "web view ready"
                );
                self.live = Some(live);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to open window");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested");
                self.should_exit = true;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(live) = self.live.as_mut() {
                    live.session.resize(to_size(size));
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        if let Some(live) = self.live.as_mut() {
            live.session.run_until_idle(&mut live.ui);
            live.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::wait_duration(
            std::time::Duration::from_millis(16),
        ));
    }
}

/// Open the window and block until it closes.
pub fn run(config: TurboConfig) -> Result<(), TurboError> {
    let event_loop = EventLoop::new().map_err(|e| TurboError::Engine(e.to_string()))?;
    let mut app = TurboWindowApp::new(config);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| TurboError::Engine(e.to_string()))
}
