use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::ContainerId;

/// Session lifecycle notifications for observers outside the session
/// (host UI, analytics, the demo binary).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionEvent {
    ColdBootStarted {
        location: String,
    },
    VisitStarted {
        container: ContainerId,
        location: String,
    },
    VisitRendered {
        container: ContainerId,
        location: String,
    },
    VisitCompleted {
        container: ContainerId,
        location: String,
        restoration_identifier: String,
    },
    VisitFailed {
        container: ContainerId,
        location: String,
        status_code: i32,
    },
    WebViewAttached(ContainerId),
    WebViewDetached(ContainerId),
    PageInvalidated,
    TurboFailedToLoad,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: SessionEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(SessionEvent::PageInvalidated);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, SessionEvent::PageInvalidated));
    }

    #[tokio::test]
    async fn visit_events_arrive_in_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let container = ContainerId(1);

        bus.publish(SessionEvent::VisitStarted {
            container,
            location: "https://example.com".into(),
        });
        bus.publish(SessionEvent::VisitRendered {
            container,
            location: "https://example.com".into(),
        });

        let e1 = rx.recv().await.unwrap();
        assert!(matches!(e1, SessionEvent::VisitStarted { container: c, .. } if c == container));
        let e2 = rx.recv().await.unwrap();
        assert!(matches!(e2, SessionEvent::VisitRendered { .. }));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(SessionEvent::TurboFailedToLoad), 0);
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: SessionEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, SessionEvent::Unknown));
    }
}
