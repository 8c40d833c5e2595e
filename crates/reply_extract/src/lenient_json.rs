//! Tolerant JSON recovery for model output.
//!
//! Models wrap JSON in prose, code fences or both. Parsing tries, in order:
//! the trimmed text as-is, the body of a surrounding code fence, and finally
//! the first balanced `{ … }` span that parses.

use serde_json::Value;

/// Parses `text` as JSON, tolerating surrounding noise. Returns `None` when no
/// JSON payload can be recovered.
#[must_use]
pub fn parse_lenient(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if let Some(body) = strip_code_fence(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            return Some(value);
        }
    }

    first_balanced_object(trimmed)
}

/// Body of a text that starts with a ```` ``` ```` fence line. The closing
/// fence is optional.
#[must_use]
pub fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.trim().strip_prefix("```")?;
    let body_start = rest.find('\n')? + 1;
    let body = rest[body_start..].trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    Some(body.trim())
}

/// First `{ … }` span, matched with string and escape awareness, that parses
/// as JSON. Spans are ordered by where they open; braces inside strings never
/// open one.
#[must_use]
pub fn first_balanced_object(text: &str) -> Option<Value> {
    let mut spans = balanced_spans(text.as_bytes());
    spans.sort_unstable_by_key(|&(start, _)| start);

    spans
        .into_iter()
        .find_map(|(start, end)| serde_json::from_str::<Value>(&text[start..end]).ok())
}

/// Every closed brace span as `(start, exclusive end)`, found in one pass.
/// Text outside any span is not string-aware, so a stray quote there cannot
/// hide a later object.
fn balanced_spans(bytes: &[u8]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut open = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (index, &byte) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' if !open.is_empty() => in_string = true,
            b'{' => open.push(index),
            b'}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, index + 1));
                }
            }
            _ => {}
        }
    }

    spans
}
