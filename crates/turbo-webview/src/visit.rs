//! Visit options carried with every visit command.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use turbo_common::BridgeError;

/// What a visit does to the page history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitAction {
    #[default]
    Advance,
    Replace,
    Restore,
}

/// Whether the page may serve a cached snapshot for the visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    #[default]
    Default,
    Reload,
}

/// A response already in hand, rendered without a new request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitResponse {
    pub status_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_html: Option<String>,
}

/// Immutable per-visit options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitOptions {
    #[serde(default)]
    pub action: VisitAction,
    #[serde(default)]
    pub cache_policy: CachePolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<VisitResponse>,
}

impl VisitOptions {
    pub fn new(action: VisitAction) -> Self {
        Self {
            action,
            ..Default::default()
        }
    }

    /// Same options with a different action.
    pub fn with_action(&self, action: VisitAction) -> Self {
        Self {
            action,
            ..self.clone()
        }
    }

    /// JSON object text with keys in sorted order.
    pub fn to_json(&self) -> Result<String, BridgeError> {
        let map: BTreeMap<String, Value> = serde_json::from_value(serde_json::to_value(self)?)?;
        Ok(serde_json::to_string(&map)?)
    }

    /// Parse options posted by the page. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(json).map_err(|e| BridgeError::InvalidMessage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_serialize_sorted() {
        let json = VisitOptions::default().to_json().unwrap();
        assert_eq!(json, r#"{"action":"advance","cachePolicy":"default"}"#);
    }

    #[test]
    fn optional_fields_are_omitted_until_set() {
        let mut options = VisitOptions::new(VisitAction::Replace);
        options.response = Some(VisitResponse {
            status_code: 422,
            response_html: Some("<form></form>".into()),
        });
        options.snapshot_html = Some("<p>old</p>".into());
        let json = options.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"action":"replace","cachePolicy":"default","response":{"responseHtml":"<form></form>","statusCode":422},"snapshotHtml":"<p>old</p>"}"#
        );
    }

    #[test]
    fn from_json_fills_defaults() {
        let options = VisitOptions::from_json(r#"{"action":"restore"}"#).unwrap();
        assert_eq!(options.action, VisitAction::Restore);
        assert_eq!(options.cache_policy, CachePolicy::Default);
        assert!(options.snapshot_html.is_none());
    }

    #[test]
    fn from_json_rejects_unknown_action() {
        let err = VisitOptions::from_json(r#"{"action":"teleport"}"#).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidMessage(_)));
    }

    #[test]
    fn with_action_keeps_other_fields() {
        let mut options = VisitOptions::new(VisitAction::Advance);
        options.cache_policy = CachePolicy::Reload;
        let replaced = options.with_action(VisitAction::Replace);
        assert_eq!(replaced.action, VisitAction::Replace);
        assert_eq!(replaced.cache_policy, CachePolicy::Reload);
    }
}
