//! Messages from the page's bridge to the native side.
//!
//! The bridge posts `{"kind": ..., "payload": {...}}` through
//! `window.ipc.postMessage`. Bodies are parsed in two steps: the envelope
//! first, then the payload according to its kind.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use turbo_common::BridgeError;

use crate::visit::VisitOptions;

/// Raw envelope of a bridge message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcEnvelope {
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

/// A visit lifecycle callback from the page.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeMessage {
    VisitProposedToLocation {
        location: String,
        options: VisitOptions,
    },
    VisitStarted {
        visit_identifier: String,
        visit_has_cached_snapshot: bool,
        location: String,
    },
    VisitRequestCompleted {
        visit_identifier: String,
    },
    VisitRequestFailedWithStatusCode {
        visit_identifier: String,
        visit_has_cached_snapshot: bool,
        status_code: i32,
    },
    VisitRequestFinished {
        visit_identifier: String,
    },
    PageLoaded {
        restoration_identifier: String,
    },
    VisitRendered {
        visit_identifier: String,
    },
    VisitCompleted {
        visit_identifier: String,
        restoration_identifier: String,
    },
    PageInvalidated,
    TurboIsReady {
        is_ready: bool,
    },
    TurboFailedToLoad,
    ScrollChanged {
        scroll_y: i32,
    },
    /// A kind this side does not know about.
    Unknown(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Proposal {
    location: String,
    #[serde(default)]
    options: VisitOptions,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Started {
    visit_identifier: String,
    #[serde(default)]
    visit_has_cached_snapshot: bool,
    location: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisitOnly {
    visit_identifier: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Failed {
    visit_identifier: String,
    #[serde(default)]
    visit_has_cached_snapshot: bool,
    status_code: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Restoration {
    #[serde(default)]
    restoration_identifier: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Completed {
    visit_identifier: String,
    #[serde(default)]
    restoration_identifier: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ready {
    is_ready: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scroll {
    scroll_y: i32,
}

fn payload<T: DeserializeOwned>(kind: &str, value: Value) -> Result<T, BridgeError> {
    serde_json::from_value(value)
        .map_err(|e| BridgeError::InvalidMessage(format!("{kind}: {e}")))
}

impl BridgeMessage {
    /// Parse a message body posted by the bridge.
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        let envelope: IpcEnvelope =
            serde_json::from_str(raw).map_err(|e| BridgeError::InvalidMessage(e.to_string()))?;
        Self::from_envelope(envelope)
    }

    pub fn from_envelope(envelope: IpcEnvelope) -> Result<Self, BridgeError> {
        let IpcEnvelope { kind, payload: value } = envelope;
        let message = match kind.as_str() {
            "visitProposedToLocation" => {
                let p: Proposal = payload(&kind, value)?;
                Self::VisitProposedToLocation {
                    location: p.location,
                    options: p.options,
                }
            }
            "visitStarted" => {
                let p: Started = payload(&kind, value)?;
                Self::VisitStarted {
                    visit_identifier: p.visit_identifier,
                    visit_has_cached_snapshot: p.visit_has_cached_snapshot,
                    location: p.location,
                }
            }
            "visitRequestCompleted" => Self::VisitRequestCompleted {
                visit_identifier: payload::<VisitOnly>(&kind, value)?.visit_identifier,
            },
            "visitRequestFailedWithStatusCode" => {
                let p: Failed = payload(&kind, value)?;
                Self::VisitRequestFailedWithStatusCode {
                    visit_identifier: p.visit_identifier,
                    visit_has_cached_snapshot: p.visit_has_cached_snapshot,
                    status_code: p.status_code,
                }
            }
            "visitRequestFinished" => Self::VisitRequestFinished {
                visit_identifier: payload::<VisitOnly>(&kind, value)?.visit_identifier,
            },
            "pageLoaded" => Self::PageLoaded {
                restoration_identifier: payload::<Restoration>(&kind, value)?
                    .restoration_identifier,
            },
            "visitRendered" => Self::VisitRendered {
                visit_identifier: payload::<VisitOnly>(&kind, value)?.visit_identifier,
            },
            "visitCompleted" => {
                let p: Completed = payload(&kind, value)?;
                Self::VisitCompleted {
                    visit_identifier: p.visit_identifier,
                    restoration_identifier: p.restoration_identifier,
                }
            }
            "pageInvalidated" => Self::PageInvalidated,
            "turboIsReady" => Self::TurboIsReady {
                is_ready: payload::<Ready>(&kind, value)?.is_ready,
            },
            "turboFailedToLoad" => Self::TurboFailedToLoad,
            "scrollChanged" => Self::ScrollChanged {
                scroll_y: payload::<Scroll>(&kind, value)?.scroll_y,
            },
            _ => Self::Unknown(kind),
        };
        Ok(message)
    }
}
