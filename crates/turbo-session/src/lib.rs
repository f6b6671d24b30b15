//! Visit orchestration for a Turbo navigation session.
//!
//! A `Session` owns the shared `WebViewHost` and an arena of
//! `ViewContainer`s, one per back-stack entry. It issues visits, moves the
//! web view to whichever container is on top, and drives container state
//! from the lifecycle messages the page posts back.

pub mod config;
pub mod delegate;
pub mod destinations;
pub mod session;

pub use config::{asset_source, build_host, container_options, web_settings};
pub use delegate::{DefaultDelegate, SessionDelegate};
pub use destinations::{Destination, DestinationRegistry, DEFAULT_DESTINATION_URI};
pub use session::{BackStackEntry, Session};
