//! Visit argument encoding.
//!
//! Builds the literal argument list of a bridge call: every argument is
//! serialized to JSON on its own and the results are joined with commas,
//! ready to be interpolated between the parentheses of a function call.
//! `serde_json` never HTML-escapes, so markup in locations or snapshot HTML
//! reaches the page unchanged.

use serde::Serialize;
use turbo_common::{BridgeError, VisitIdentifier};

use crate::visit::VisitOptions;

/// Accumulates heterogeneous bridge-call arguments.
#[derive(Debug, Default, Clone)]
pub struct VisitEncoder {
    segments: Vec<String>,
}

impl VisitEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one argument.
    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, BridgeError> {
        self.segments.push(serde_json::to_string(value)?);
        Ok(self)
    }

    /// The comma-joined argument list.
    pub fn finish(self) -> String {
        self.segments.join(",")
    }
}

/// Arguments for `visitLocationWithOptionsAndRestorationIdentifier`.
///
/// The options travel as a JSON string that the page parses itself.
pub fn encode_visit(
    location: &str,
    options: &VisitOptions,
    restoration_identifier: &VisitIdentifier,
) -> Result<String, BridgeError> {
    Ok(VisitEncoder::new()
        .arg(location)?
        .arg(&options.to_json()?)?
        .arg(restoration_identifier)?
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::VisitAction;
    use serde_json::Value;

    /// Split an encoded list back into its JSON values.
    fn decode(encoded: &str) -> Vec<Value> {
        serde_json::from_str(&format!("[{encoded}]")).unwrap()
    }

    #[test]
    fn encodes_three_segments() {
        let options = VisitOptions::new(VisitAction::Advance);
        let encoded = encode_visit(
            "https://example.com/path?q=1",
            &options,
            &VisitIdentifier::from("rid-42"),
        )
        .unwrap();

        let values = decode(&encoded);
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], "https://example.com/path?q=1");
        assert_eq!(values[2], "rid-42");

        let options_json = values[1].as_str().unwrap();
        assert_eq!(VisitOptions::from_json(options_json).unwrap(), options);
    }

    #[test]
    fn leaves_markup_unescaped() {
        let encoded = VisitEncoder::new()
            .arg("<a href='x'>&amp;=</a>")
            .unwrap()
            .finish();
        assert_eq!(encoded, "\"<a href='x'>&amp;=</a>\"");
    }

    #[test]
    fn escapes_quotes_for_the_script_context() {
        let encoded = VisitEncoder::new().arg("say \"hi\"\n").unwrap().finish();
        assert_eq!(encoded, r#""say \"hi\"\n""#);
        assert_eq!(decode(&encoded)[0], "say \"hi\"\n");
    }

    #[test]
    fn mixes_argument_types() {
        let encoded = VisitEncoder::new()
            .arg("a")
            .unwrap()
            .arg(&3)
            .unwrap()
            .arg(&true)
            .unwrap()
            .finish();
        assert_eq!(encoded, r#""a",3,true"#);
    }

    #[test]
    fn empty_encoder_is_empty_list() {
        assert_eq!(VisitEncoder::new().finish(), "");
    }

    #[test]
    fn snapshot_html_survives_round_trip() {
        let mut options = VisitOptions::new(VisitAction::Replace);
        options.snapshot_html = Some("<html><body>cached</body></html>".into());
        let encoded = encode_visit("https://example.com", &options, &VisitIdentifier::empty())
            .unwrap();
        assert!(encoded.contains("<html><body>cached</body></html>"));

        let values = decode(&encoded);
        let back = VisitOptions::from_json(values[1].as_str().unwrap()).unwrap();
        assert_eq!(back, options);
        assert_eq!(values[2], "");
    }
}
