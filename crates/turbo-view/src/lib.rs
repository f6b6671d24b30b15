//! Native view containers that host the shared web view.
//!
//! Each screen owns a `ViewContainer` with four regions: the web surface,
//! a progress overlay, an error overlay and a screenshot overlay. Containers
//! take turns hosting the single `WebViewHost`; while it is elsewhere a
//! screenshot of the last rendered content stands in for it.

pub mod container;
pub mod memory;
pub mod refresh;
pub mod region;
pub mod screenshot;
pub mod view;

pub use container::{ContainerOptions, ViewContainer};
pub use memory::{FixedMemory, MemoryProbe, MemoryUsage, SystemMemory};
pub use refresh::RefreshLayout;
pub use region::Region;
pub use screenshot::{Bitmap, ContentRenderer, Screenshot, SolidRenderer};
pub use view::View;
