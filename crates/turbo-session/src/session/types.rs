//! Core types and constructors for Session.

use std::collections::HashMap;

use tokio::sync::broadcast;
use turbo_common::{
    ContainerId, EventBus, SessionEvent, SessionId, Size, TurboError, VisitIdentifier,
};
use turbo_config::TurboConfig;
use turbo_view::{ContainerOptions, ContentRenderer, Screenshot, SolidRenderer, ViewContainer};
use turbo_webview::{VisitOptions, WebViewHost};

use crate::config::container_options;
use crate::delegate::SessionDelegate;
use crate::destinations::DestinationRegistry;

/// One screen in the back stack.
#[derive(Debug, Clone)]
pub struct BackStackEntry {
    pub container: ContainerId,
    pub location: String,
    pub options: VisitOptions,
    /// Last restoration identifier the page reported for this entry.
    pub restoration_identifier: VisitIdentifier,
    /// Captured when the web view left this entry's container.
    pub screenshot: Option<Screenshot>,
}

/// The visit currently in flight.
#[derive(Debug, Clone)]
pub(super) struct ActiveVisit {
    pub(super) container: ContainerId,
    pub(super) location: String,
    /// Natively generated identifier while cold booting.
    pub(super) cold_boot: Option<VisitIdentifier>,
    /// Identifier the page assigned in `visitStarted`.
    pub(super) page_identifier: Option<String>,
    pub(super) failed: bool,
}

/// Owns the shared web view, the containers and the back stack.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) host: WebViewHost,
    pub(super) containers: HashMap<ContainerId, ViewContainer>,
    pub(super) next_container: u32,
    pub(super) back_stack: Vec<BackStackEntry>,
    pub(super) delegate: Box<dyn SessionDelegate>,
    pub(super) registry: DestinationRegistry,
    pub(super) renderer: Box<dyn ContentRenderer>,
    pub(super) container_options: ContainerOptions,
    pub(super) viewport: Size,
    pub(super) events: EventBus,
    /// Whether the loaded page has reported Turbo ready.
    pub(super) ready: bool,
    pub(super) active: Option<ActiveVisit>,
}

impl Session {
    pub fn new(
        host: WebViewHost,
        delegate: Box<dyn SessionDelegate>,
        registry: DestinationRegistry,
    ) -> Self {
        let container_options = ContainerOptions::default();
        let background = container_options.background.unwrap_or(turbo_common::Color::WHITE);
        Self {
            id: SessionId::new(),
            host,
            containers: HashMap::new(),
            next_container: 1,
            back_stack: Vec::new(),
            delegate,
            registry,
            renderer: Box::new(SolidRenderer(background)),
            container_options,
            viewport: Size::default(),
            events: EventBus::default(),
            ready: false,
            active: None,
        }
    }

    /// Create a session wired from `config`.
    pub fn from_config(
        config: &TurboConfig,
        host: WebViewHost,
        delegate: Box<dyn SessionDelegate>,
    ) -> Result<Self, TurboError> {
        let registry = DestinationRegistry::from_rules(&config.destinations)?;
        Ok(Self::new(host, delegate, registry).with_container_options(container_options(config)))
    }

    pub fn with_container_options(mut self, options: ContainerOptions) -> Self {
        if let Some(background) = options.background {
            self.renderer = Box::new(SolidRenderer(background));
        }
        self.container_options = options;
        self
    }

    /// Replace how container content is drawn into screenshots.
    pub fn with_renderer(mut self, renderer: Box<dyn ContentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    // -- Accessors --

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn host(&self) -> &WebViewHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut WebViewHost {
        &mut self.host
    }

    pub fn container(&self, id: ContainerId) -> Option<&ViewContainer> {
        self.containers.get(&id)
    }

    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut ViewContainer> {
        self.containers.get_mut(&id)
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn back_stack(&self) -> &[BackStackEntry] {
        &self.back_stack
    }

    pub fn current_entry(&self) -> Option<&BackStackEntry> {
        self.back_stack.last()
    }

    pub fn current_container(&self) -> Option<ContainerId> {
        self.current_entry().map(|e| e.container)
    }

    /// Whether the loaded page has Turbo running.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether a visit is in flight.
    pub fn is_visiting(&self) -> bool {
        self.active.is_some()
    }

    pub fn registry(&self) -> &DestinationRegistry {
        &self.registry
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(super) fn publish(&self, event: SessionEvent) {
        self.events.publish(event);
    }

    pub(super) fn entry_mut(&mut self, container: ContainerId) -> Option<&mut BackStackEntry> {
        self.back_stack
            .iter_mut()
            .rev()
            .find(|e| e.container == container)
    }
}
