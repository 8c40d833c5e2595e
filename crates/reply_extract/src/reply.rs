use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// Normalized structured reply produced by the agent.
///
/// Every field is optional and absence is kept distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmailReply {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub detected_intent: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub is_sensitive: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub sensitivity_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub subject_line: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub signature_placeholder: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::serialize_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence_score: Option<f64>,
}

impl EmailReply {
    /// Reads the known fields out of a JSON object. Unknown keys are ignored
    /// and wrongly-typed values count as absent, so this cannot fail.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            detected_intent: text("detected_intent"),
            is_sensitive: object.get("is_sensitive").and_then(Value::as_bool),
            sensitivity_reason: text("sensitivity_reason"),
            subject_line: text("subject_line"),
            greeting: text("greeting"),
            body: text("body"),
            closing: text("closing"),
            signature_placeholder: text("signature_placeholder"),
            confidence_score: object
                .get("confidence_score")
                .and_then(Value::as_f64)
                .filter(|score| score.is_finite()),
        }
    }

    /// Confidence clamped into `0..=100`; a missing score reads as zero.
    #[must_use]
    pub fn clamped_confidence(&self) -> f64 {
        self.confidence_score.map_or(0.0, |score| score.clamp(0.0, 100.0))
    }

    /// True only when the agent explicitly flagged the email as sensitive.
    #[must_use]
    pub fn flagged_sensitive(&self) -> bool {
        self.is_sensitive == Some(true)
    }

    /// Sensitivity reason when present and non-empty.
    #[must_use]
    pub fn sensitivity_reason(&self) -> Option<&str> {
        self.sensitivity_reason
            .as_deref()
            .filter(|reason| !reason.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::EmailReply;

    #[test]
    fn from_object_ignores_unknown_and_mistyped_fields() {
        let object = json!({
            "subject_line": "Re: Invoice",
            "greeting": 42,
            "is_sensitive": "yes",
            "confidence_score": "high",
            "mood": "cheerful"
        });
        let reply = EmailReply::from_object(object.as_object().expect("object"));
        assert_eq!(
            reply,
            EmailReply {
                subject_line: Some("Re: Invoice".to_string()),
                ..EmailReply::default()
            }
        );
    }

    #[test]
    fn empty_strings_stay_distinct_from_absent() {
        let object = json!({ "sensitivity_reason": "" });
        let reply = EmailReply::from_object(object.as_object().expect("object"));
        assert_eq!(reply.sensitivity_reason.as_deref(), Some(""));
        assert_eq!(reply.sensitivity_reason(), None);
        assert_eq!(reply.closing, None);
    }

    #[test]
    fn serde_decoding_matches_from_object() {
        let value = json!({
            "detected_intent": "inquiry",
            "is_sensitive": true,
            "body": ["not", "a", "string"],
            "confidence_score": 77.5
        });
        let decoded: EmailReply = serde_json::from_value(value.clone()).expect("decodes");
        assert_eq!(
            decoded,
            EmailReply::from_object(value.as_object().expect("object"))
        );
    }

    #[test]
    fn whole_scores_serialize_as_integers() {
        let reply = EmailReply {
            confidence_score: Some(92.0),
            greeting: Some("Hi".to_string()),
            ..EmailReply::default()
        };
        assert_eq!(
            serde_json::to_value(&reply).expect("serializes"),
            json!({ "greeting": "Hi", "confidence_score": 92 })
        );
    }

    #[test]
    fn confidence_is_clamped_for_display() {
        let mut reply = EmailReply::default();
        assert_eq!(reply.clamped_confidence(), 0.0);
        reply.confidence_score = Some(140.0);
        assert_eq!(reply.clamped_confidence(), 100.0);
        reply.confidence_score = Some(-3.0);
        assert_eq!(reply.clamped_confidence(), 0.0);
        reply.confidence_score = Some(64.5);
        assert_eq!(reply.clamped_confidence(), 64.5);
    }
}
