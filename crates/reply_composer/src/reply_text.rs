//! Plain-text forms of a reply for the clipboard.

use reply_extract::EmailReply;

/// Full reply as copied from the output panel.
///
/// A `Subject: ...` line leads when the reply has a non-empty subject. Greeting,
/// body, closing and signature follow, separated by blank lines, and the
/// result is trimmed. `body_override` replaces the reply body, used while the
/// body is being edited.
pub fn full_reply_text(reply: &EmailReply, body_override: Option<&str>) -> String {
    let subject = reply
        .subject_line
        .as_deref()
        .filter(|subject| !subject.is_empty())
        .map(|subject| format!("Subject: {subject}"));
    let body = body_override.unwrap_or_else(|| reply.body.as_deref().unwrap_or_default());

    let mut lines: Vec<&str> = Vec::with_capacity(9);
    if let Some(subject) = subject.as_deref() {
        lines.push(subject);
    }
    lines.extend([
        "",
        field(&reply.greeting),
        "",
        body,
        "",
        field(&reply.closing),
        "",
        field(&reply.signature_placeholder),
    ]);

    lines.join("\n").trim().to_string()
}

/// Reply as copied from a history card: no subject line and no trimming.
pub fn history_reply_text(reply: &EmailReply) -> String {
    [
        field(&reply.greeting),
        "",
        field(&reply.body),
        "",
        field(&reply.closing),
        "",
        field(&reply.signature_placeholder),
    ]
    .join("\n")
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
