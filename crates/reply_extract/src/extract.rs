use serde_json::{Map, Value};
use tracing::debug;

use crate::lenient::is_truthy;
use crate::lenient_json::parse_lenient;
use crate::reply::EmailReply;

/// Locates the reply object inside a raw agent result and returns it as a
/// typed [`EmailReply`]. `None` means no structured reply could be found.
#[must_use]
pub fn extract(raw: &Value) -> Option<EmailReply> {
    extract_object(raw).map(|object| EmailReply::from_object(&object))
}

/// Same lookup as [`extract`], returning the accepted JSON object untouched.
///
/// Steps, each working on the current candidate:
/// 1. start from `raw.response.result`;
/// 2. a string candidate is parsed leniently;
/// 3. a nested `result` object replaces the candidate;
/// 4. a string `text` field is parsed leniently and replaces the candidate
///    when it yields an object without a truthy `error` marker;
/// 5. only a JSON object is accepted.
#[must_use]
pub fn extract_object(raw: &Value) -> Option<Map<String, Value>> {
    let candidate = raw
        .get("response")
        .and_then(|response| response.get("result"))
        .cloned();

    let candidate = match candidate {
        Some(Value::String(text)) => {
            let parsed = parse_lenient(&text);
            if parsed.is_none() {
                debug!(len = text.len(), "agent result string held no recoverable json");
            }
            parsed
        }
        other => other,
    };

    let nested = candidate
        .as_ref()
        .and_then(|value| value.get("result"))
        .filter(|nested| nested.is_object())
        .cloned();
    let candidate = nested.or(candidate);

    let from_text = candidate
        .as_ref()
        .and_then(|value| value.get("text"))
        .and_then(Value::as_str)
        .and_then(parse_lenient)
        .filter(|parsed| parsed.is_object() && !is_truthy(parsed.get("error")));
    let candidate = from_text.or(candidate);

    match candidate {
        Some(Value::Object(object)) => Some(object),
        Some(other) => {
            debug!(kind = value_kind(&other), "agent result is not a json object");
            None
        }
        None => {
            debug!("agent result missing");
            None
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
