use serde::{Deserialize, Serialize};
use std::fmt;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(new_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token correlating a visit with native-held restoration state.
///
/// Used both for restoration identifiers handed out by the page and for the
/// cold boot visit identifier generated natively. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitIdentifier(String);

impl VisitIdentifier {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(new_id())
    }

    /// The empty identifier, used for a visit that has no restoration state yet.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for VisitIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for VisitIdentifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for VisitIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn session_id_display() {
        let sid = SessionId::new();
        assert_eq!(sid.to_string(), sid.as_str());
    }

    #[test]
    fn generated_visit_identifiers_are_unique() {
        let a = VisitIdentifier::generate();
        let b = VisitIdentifier::generate();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn empty_visit_identifier() {
        let id = VisitIdentifier::empty();
        assert!(id.is_empty());
        assert_eq!(id.as_str(), "");
        assert_eq!(id, VisitIdentifier::default());
    }

    #[test]
    fn visit_identifier_serializes_as_plain_string() {
        let id = VisitIdentifier::from("rid-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"rid-42\"");
        let back: VisitIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
