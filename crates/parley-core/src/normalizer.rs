//! Reply normalization for the chat webhook.
//!
//! The webhook is a third-party automation endpoint and its reply schema
//! drifts: sometimes a bare object, sometimes a one-element array, and the
//! text can live under any of several keys. [`ResponseNormalizer::normalize`]
//! turns whatever decoded JSON comes back into one display string and never
//! fails.

use serde_json::{Map, Value};

/// Keys tried in order; the first present, non-null one wins.
pub const CANDIDATE_KEYS: [&str; 6] = ["output", "response", "message", "text", "answer", "content"];

pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn normalize(raw_payload: &Value) -> String {
        let empty = Map::new();

        let (candidate, fallback) = match raw_payload {
            Value::Array(items) if items.is_empty() => (&empty, Fallback::EmptyObject),
            Value::Array(items) => (
                items[0].as_object().unwrap_or(&empty),
                Fallback::Payload,
            ),
            Value::Object(map) => (map, Fallback::Payload),
            _ => (&empty, Fallback::Payload),
        };

        for key in CANDIDATE_KEYS {
            if let Some(text) = Self::string_field(candidate, key) {
                log::debug!("Webhook reply text taken from '{}'", key);
                return text;
            }
        }

        log::debug!("Webhook reply matched no known key; serializing payload");
        match fallback {
            Fallback::EmptyObject => Value::Object(Map::new()).to_string(),
            Fallback::Payload => Self::display(raw_payload),
        }
    }

    /// Typed accessor for one candidate key. `None` when absent or null.
    pub fn string_field(candidate: &Map<String, Value>, key: &str) -> Option<String> {
        match candidate.get(key)? {
            Value::Null => None,
            value => Some(Self::display(value)),
        }
    }

    fn display(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            other => other.to_string(),
        }
    }
}

enum Fallback {
    EmptyObject,
    Payload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn output_wins_over_response() {
        let payload = json!({ "output": "A", "response": "B" });
        assert_eq!(ResponseNormalizer::normalize(&payload), "A");
    }

    #[test]
    fn first_array_element_is_inspected() {
        let payload = json!([{ "response": "B" }]);
        assert_eq!(ResponseNormalizer::normalize(&payload), "B");
    }

    #[test]
    fn only_the_first_array_element_counts() {
        let payload = json!([{ "other": 1 }, { "output": "ignored" }]);
        assert_eq!(
            ResponseNormalizer::normalize(&payload),
            r#"[{"other":1},{"output":"ignored"}]"#
        );
    }

    #[test]
    fn precedence_follows_the_fixed_key_order() {
        let payload = json!({
            "content": "6",
            "answer": "5",
            "text": "4",
            "message": "3",
        });
        assert_eq!(ResponseNormalizer::normalize(&payload), "3");

        let payload = json!({ "content": "6", "answer": "5" });
        assert_eq!(ResponseNormalizer::normalize(&payload), "5");

        let payload = json!({ "content": "only content" });
        assert_eq!(ResponseNormalizer::normalize(&payload), "only content");
    }

    #[test]
    fn null_values_are_skipped() {
        let payload = json!({ "output": null, "text": "from text" });
        assert_eq!(ResponseNormalizer::normalize(&payload), "from text");
    }

    #[test]
    fn non_string_values_are_coerced() {
        assert_eq!(ResponseNormalizer::normalize(&json!({ "output": 42 })), "42");
        assert_eq!(ResponseNormalizer::normalize(&json!({ "answer": true })), "true");
        assert_eq!(
            ResponseNormalizer::normalize(&json!({ "response": { "a": 1 } })),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn empty_string_is_a_present_value() {
        let payload = json!({ "output": "", "response": "B" });
        assert_eq!(ResponseNormalizer::normalize(&payload), "");
    }

    #[test]
    fn empty_object_serializes() {
        assert_eq!(ResponseNormalizer::normalize(&json!({})), "{}");
    }

    #[test]
    fn empty_array_serializes_as_empty_object() {
        assert_eq!(ResponseNormalizer::normalize(&json!([])), "{}");
    }

    #[test]
    fn unknown_keys_fall_back_to_compact_json() {
        let payload = json!({ "result": "x" });
        assert_eq!(ResponseNormalizer::normalize(&payload), r#"{"result":"x"}"#);
    }

    #[test]
    fn scalar_payloads_are_shown_directly() {
        assert_eq!(
            ResponseNormalizer::normalize(&json!("plain string")),
            "plain string"
        );
        assert_eq!(ResponseNormalizer::normalize(&json!(7)), "7");
        assert_eq!(ResponseNormalizer::normalize(&Value::Null), "null");
    }

    #[test]
    fn array_of_scalars_falls_back_to_serialization() {
        assert_eq!(ResponseNormalizer::normalize(&json!(["hi"])), r#"["hi"]"#);
    }
}
