//! Destination routing rules.

use serde::{Deserialize, Serialize};

/// How a destination is presented relative to the current back-stack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    #[default]
    Push,
    Replace,
    Modal,
    BottomSheet,
    /// Proposal is ignored.
    None,
}

/// Maps locations matching `pattern` to an opaque destination `uri`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationRule {
    /// Regular expression matched against the full location.
    pub pattern: String,
    pub uri: String,
    #[serde(default)]
    pub presentation: Presentation,
}
