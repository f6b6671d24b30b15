//! The view container state machine.
//!
//! Overlay rules:
//! - At most one of progress, error and screenshot is visible.
//! - A visible screenshot suppresses new progress views.
//! - Any other overlay added replaces whatever overlay is showing.
//! - The error region's pull-to-refresh is live only while an error view
//!   is shown.

mod operations;
mod types;

pub use types::{ContainerOptions, ViewContainer};
