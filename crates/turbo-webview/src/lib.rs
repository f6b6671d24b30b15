//! Shared web view and page bridge for Turbo navigation.
//!
//! Provides:
//! - A `ScriptEngine` seam with a headless engine and an optional `wry` one
//! - A UI-thread dispatcher that marshals every script evaluation
//! - Bridge installation, detected per visit so page reloads are survived
//! - Visit argument encoding and the page's lifecycle messages
//! - `WebViewHost`, the single web view shared by all view containers

pub mod assets;
pub mod bridge;
pub mod encode;
pub mod engine;
pub mod host;
pub mod ipc;
pub mod ui;
pub mod visit;

pub use assets::{AssetSource, BRIDGE_ASSET};
pub use bridge::{BridgeInstaller, BridgeState, ScriptProbe, BRIDGE_ABSENT_PROBE};
pub use encode::{encode_visit, VisitEncoder};
pub use engine::scripted::{ScriptedEngine, ScriptedPage};
pub use engine::{EngineEvent, EngineProvider, PageLoadState, ScriptEngine, WebSettings};
pub use host::WebViewHost;
pub use ipc::{BridgeMessage, IpcEnvelope};
pub use ui::{ScriptRunner, UiThread};
pub use visit::{CachePolicy, VisitAction, VisitOptions, VisitResponse};

#[cfg(feature = "wry")]
pub use engine::wry_engine::WryEngine;
