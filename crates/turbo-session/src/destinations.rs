//! Routing proposed locations to destinations.

use regex::Regex;
use tracing::debug;
use turbo_common::ConfigError;
use turbo_config::{DestinationRule, Presentation};

/// Destination used when no rule matches.
pub const DEFAULT_DESTINATION_URI: &str = "turbo://fragment/web";

/// Where a location should be shown and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub uri: String,
    pub presentation: Presentation,
}

impl Default for Destination {
    fn default() -> Self {
        Self {
            uri: DEFAULT_DESTINATION_URI.to_string(),
            presentation: Presentation::Push,
        }
    }
}

struct CompiledRule {
    pattern: Regex,
    destination: Destination,
}

/// Ordered destination rules. The first matching rule wins.
#[derive(Default)]
pub struct DestinationRegistry {
    rules: Vec<CompiledRule>,
}

impl DestinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: &[DestinationRule]) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for rule in rules {
            registry.register(&rule.pattern, &rule.uri, rule.presentation)?;
        }
        Ok(registry)
    }

    pub fn register(
        &mut self,
        pattern: &str,
        uri: &str,
        presentation: Presentation,
    ) -> Result<(), ConfigError> {
        let pattern = Regex::new(pattern).map_err(|e| {
            ConfigError::ValidationError(format!("destination pattern '{pattern}': {e}"))
        })?;
        self.rules.push(CompiledRule {
            pattern,
            destination: Destination {
                uri: uri.to_string(),
                presentation,
            },
        });
        Ok(())
    }

    pub fn resolve(&self, location: &str) -> Destination {
        let destination = self
            .rules
            .iter()
            .find(|rule| rule.pattern.is_match(location))
            .map(|rule| rule.destination.clone())
            .unwrap_or_default();
        debug!(location, uri = %destination.uri, "resolved destination");
        destination
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_location_gets_default() {
        let registry = DestinationRegistry::new();
        assert_eq!(registry.resolve("https://example.com"), Destination::default());
    }

    #[test]
    fn first_match_wins() {
        let registry = DestinationRegistry::from_rules(&[
            DestinationRule {
                pattern: r"/new$".into(),
                uri: "turbo://fragment/web/modal".into(),
                presentation: Presentation::Modal,
            },
            DestinationRule {
                pattern: r"/.*".into(),
                uri: "turbo://fragment/web/other".into(),
                presentation: Presentation::Replace,
            },
        ])
        .unwrap();

        let modal = registry.resolve("https://example.com/posts/new");
        assert_eq!(modal.presentation, Presentation::Modal);
        assert_eq!(modal.uri, "turbo://fragment/web/modal");

        let other = registry.resolve("https://example.com/posts");
        assert_eq!(other.presentation, Presentation::Replace);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn bad_pattern_is_a_validation_error() {
        let err = DestinationRegistry::from_rules(&[DestinationRule {
            pattern: "(".into(),
            uri: "turbo://x".into(),
            presentation: Presentation::Push,
        }])
        .err()
        .unwrap();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
