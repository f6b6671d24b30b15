pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{BridgeError, ConfigError, TurboError};
pub use events::{EventBus, SessionEvent};
pub use id::{new_id, SessionId, VisitIdentifier};
pub use types::{Color, ContainerId, Orientation, Size, ViewId};

pub type Result<T> = std::result::Result<T, TurboError>;
