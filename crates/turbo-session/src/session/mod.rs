//! The navigation session.
//!
//! Visit flow:
//! - Cold boot: the first visit, or any visit after the page lost Turbo,
//!   loads the location in full. Once the page reports `turboIsReady` the
//!   session tells it the cold boot visit was rendered.
//! - Later visits go through the page's bridge, carrying the entry's
//!   restoration identifier when restoring.
//! - The web view follows the top of the back stack. Before it leaves a
//!   container, that container keeps a screenshot of what it showed.

mod lifecycle;
mod navigation;
mod types;

pub use types::{BackStackEntry, Session};
