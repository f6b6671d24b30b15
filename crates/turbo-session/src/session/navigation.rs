//! Back-stack navigation and visit issuing.

use tracing::{debug, info};
use turbo_common::{ContainerId, SessionEvent, Size, TurboError, VisitIdentifier};
use turbo_view::ViewContainer;
use turbo_webview::{CachePolicy, VisitAction, VisitOptions};

use super::types::{ActiveVisit, BackStackEntry, Session};

impl Session {
    /// Lay out every container, and all future ones, at `size`.
    pub fn resize(&mut self, size: Size) {
        self.viewport = size;
        for container in self.containers.values_mut() {
            container.layout(size);
        }
    }

    /// Add an empty container to the arena.
    pub fn create_container(&mut self) -> ContainerId {
        let id = ContainerId(self.next_container);
        self.next_container += 1;
        let mut container = ViewContainer::new(id, self.container_options.clone());
        if self.viewport.is_positive() {
            container.layout(self.viewport);
        }
        self.containers.insert(id, container);
        id
    }

    /// Push a new entry for `location` and visit it.
    pub fn navigate(
        &mut self,
        location: &str,
        options: VisitOptions,
    ) -> Result<ContainerId, TurboError> {
        let container = self.create_container();
        self.back_stack.push(BackStackEntry {
            container,
            location: location.to_string(),
            options: options.clone(),
            restoration_identifier: VisitIdentifier::empty(),
            screenshot: None,
        });
        info!(%container, location, depth = self.back_stack.len(), "navigate");
        self.show(container)?;
        self.start_visit(container, location, &options)?;
        Ok(container)
    }

    /// Visit `location` inside an existing container.
    pub fn visit(
        &mut self,
        container: ContainerId,
        location: &str,
        options: VisitOptions,
    ) -> Result<(), TurboError> {
        if !self.containers.contains_key(&container) {
            return Err(TurboError::UnknownContainer(container.to_string()));
        }
        if let Some(entry) = self.entry_mut(container) {
            entry.location = location.to_string();
            entry.options = options.clone();
        }
        self.show(container)?;
        self.start_visit(container, location, &options)
    }

    /// Swap the top entry's location for `location`.
    pub fn replace(&mut self, location: &str, options: VisitOptions) -> Result<(), TurboError> {
        let options = options.with_action(VisitAction::Replace);
        match self.current_container() {
            Some(container) => self.visit(container, location, options),
            None => self.navigate(location, options).map(|_| ()),
        }
    }

    /// Drop the top entry and restore the one beneath it.
    ///
    /// Returns the container now on top, or `None` at the root.
    pub fn pop(&mut self) -> Result<Option<ContainerId>, TurboError> {
        if self.back_stack.len() < 2 {
            return Ok(None);
        }
        if let Some(popped) = self.back_stack.pop() {
            self.discard(popped.container);
        }
        self.restore_top()
    }

    /// Drop every entry above the root and restore the root.
    pub fn clear_back_stack(&mut self) -> Result<Option<ContainerId>, TurboError> {
        if self.back_stack.len() < 2 {
            return Ok(self.current_container());
        }
        let dropped: Vec<_> = self.back_stack.drain(1..).collect();
        for entry in dropped.iter().rev() {
            self.discard(entry.container);
        }
        self.restore_top()
    }

    /// Visit the top entry again, bypassing the page's cache.
    pub fn refresh(&mut self) -> Result<(), TurboError> {
        let Some(entry) = self.current_entry().cloned() else {
            return Ok(());
        };
        if let Some(container) = self.containers.get_mut(&entry.container) {
            container.remove_error_view();
        }
        let mut options = entry.options.with_action(VisitAction::Replace);
        options.cache_policy = CachePolicy::Reload;
        debug!(location = %entry.location, "refresh");
        self.start_visit(entry.container, &entry.location, &options)
    }

    /// A pull gesture on the top container. With an error shown, any pull
    /// at the top of the error view retries; otherwise the content region
    /// must start a refresh.
    pub fn pull_to_refresh(&mut self) -> Result<bool, TurboError> {
        let Some(id) = self.current_container() else {
            return Ok(false);
        };
        let Some(container) = self.containers.get_mut(&id) else {
            return Ok(false);
        };
        let started = if container.is_error_visible() {
            container.pull_error()
        } else {
            container.pull_content(&self.host)
        };
        if started {
            self.refresh()?;
        }
        Ok(started)
    }

    fn restore_top(&mut self) -> Result<Option<ContainerId>, TurboError> {
        let Some(entry) = self.current_entry().cloned() else {
            return Ok(None);
        };
        self.show(entry.container)?;
        let options = entry.options.with_action(VisitAction::Restore);
        self.start_visit(entry.container, &entry.location, &options)?;
        Ok(Some(entry.container))
    }

    /// Remove a container from the arena, releasing the web view if it holds it.
    fn discard(&mut self, container: ContainerId) {
        if let Some(mut removed) = self.containers.remove(&container) {
            if removed.detach_web_view(&mut self.host) {
                self.publish(SessionEvent::WebViewDetached(container));
            }
        }
        if self
            .active
            .as_ref()
            .is_some_and(|visit| visit.container == container)
        {
            debug!(%container, "abandoning visit of discarded container");
            self.active = None;
        }
    }

    /// Move the web view into `container`, leaving a screenshot behind in
    /// the container it came from.
    pub(super) fn show(&mut self, container: ContainerId) -> Result<(), TurboError> {
        if !self.containers.contains_key(&container) {
            return Err(TurboError::UnknownContainer(container.to_string()));
        }

        if let Some(previous) = self.host.parent().filter(|p| *p != container) {
            let screenshot = self
                .containers
                .get(&previous)
                .and_then(|c| c.create_screenshot(self.renderer.as_ref()));
            match self.containers.get_mut(&previous) {
                Some(prev) => {
                    prev.add_screenshot(screenshot.clone());
                    prev.detach_web_view(&mut self.host);
                }
                None => {
                    self.host.detach_from(previous);
                }
            }
            if let Some(entry) = self.entry_mut(previous) {
                entry.screenshot = screenshot;
            }
            self.publish(SessionEvent::WebViewDetached(previous));
        }

        let attached = match self.containers.get_mut(&container) {
            Some(target) => target.attach_web_view(&mut self.host),
            None => false,
        };
        if attached {
            self.publish(SessionEvent::WebViewAttached(container));
        }
        Ok(())
    }

    pub(super) fn start_visit(
        &mut self,
        container: ContainerId,
        location: &str,
        options: &VisitOptions,
    ) -> Result<(), TurboError> {
        if let Some(superseded) = self.active.take() {
            debug!(location = %superseded.location, "visit superseded");
        }
        if !self.ready {
            self.cold_boot(container, location);
            return Ok(());
        }

        let restoration = match options.action {
            VisitAction::Restore => self
                .entry_mut(container)
                .map(|e| e.restoration_identifier.clone())
                .unwrap_or_default(),
            _ => VisitIdentifier::empty(),
        };
        self.host.visit_location(location, options, &restoration)?;
        self.active = Some(ActiveVisit {
            container,
            location: location.to_string(),
            cold_boot: None,
            page_identifier: None,
            failed: false,
        });
        Ok(())
    }

    pub(super) fn cold_boot(&mut self, container: ContainerId, location: &str) {
        let identifier = VisitIdentifier::generate();
        info!(%container, location, visit = %identifier, "cold boot");

        let progress = self.delegate.create_progress_view(location);
        if let Some(target) = self.containers.get_mut(&container) {
            target.add_progress_view(progress);
        }
        self.ready = false;
        self.active = Some(ActiveVisit {
            container,
            location: location.to_string(),
            cold_boot: Some(identifier),
            page_identifier: None,
            failed: false,
        });
        self.host.load_url(location);
        self.publish(SessionEvent::ColdBootStarted {
            location: location.to_string(),
        });
    }
}
