//! Display-ready projections of composer state.

use echo_reply::{preview, render, MarkdownBlock};
use history_store::HistoryEntry;
use reply_extract::EmailReply;
use time::macros::format_description;

const EMAIL_PREVIEW_GRAPHEMES: usize = 150;
const NO_SUBJECT: &str = "No subject";
const SENSITIVITY_WARNING: &str =
    "This email may contain sensitive or legal content. Review carefully before using.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confidence {
    /// Score clamped into `0..=100`.
    pub score: f64,
    pub band: ConfidenceBand,
}

impl Confidence {
    /// Missing and non-finite scores read as zero.
    pub fn from_score(score: Option<f64>) -> Self {
        let score = score
            .filter(|score| score.is_finite())
            .map_or(0.0, |score| score.clamp(0.0, 100.0));
        let band = if score >= 80.0 {
            ConfidenceBand::High
        } else if score >= 60.0 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        };

        Self { score, band }
    }

    /// `92%`, or `72.5%` for fractional scores.
    pub fn label(&self) -> String {
        if self.score.fract() == 0.0 {
            format!("{:.0}%", self.score)
        } else {
            format!("{}%", self.score)
        }
    }
}

/// Body area of the output panel.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyView {
    Rendered(Vec<MarkdownBlock>),
    /// Raw text while the body is being edited.
    Editing(String),
}

/// Output panel contents for the current reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyPreview {
    pub intent: Option<String>,
    pub confidence: Confidence,
    pub sensitivity_notice: Option<String>,
    pub subject: Option<String>,
    pub greeting: Option<String>,
    pub body: BodyView,
    pub closing: Option<String>,
    pub signature: Option<String>,
}

impl ReplyPreview {
    pub fn new(reply: &EmailReply, editing_body: Option<&str>) -> Self {
        let body = match editing_body {
            Some(text) => BodyView::Editing(text.to_string()),
            None => BodyView::Rendered(render(reply.body.as_deref().unwrap_or_default())),
        };

        Self {
            intent: non_empty(&reply.detected_intent),
            confidence: Confidence::from_score(reply.confidence_score),
            sensitivity_notice: sensitivity_notice(reply),
            subject: non_empty(&reply.subject_line),
            greeting: non_empty(&reply.greeting),
            body,
            closing: non_empty(&reply.closing),
            signature: non_empty(&reply.signature_placeholder),
        }
    }
}

/// Warning shown for replies the agent flagged as sensitive.
pub fn sensitivity_notice(reply: &EmailReply) -> Option<String> {
    if !reply.flagged_sensitive() {
        return None;
    }

    Some(match reply.sensitivity_reason() {
        Some(reason) => format!("{SENSITIVITY_WARNING} Reason: {reason}"),
        None => SENSITIVITY_WARNING.to_string(),
    })
}

/// Expanded part of a history card.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDetail {
    pub original_email: String,
    pub subject: Option<String>,
    pub greeting: String,
    pub body: Vec<MarkdownBlock>,
    pub closing: String,
    pub signature: String,
}

/// One row of the history list.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCard {
    pub id: String,
    pub intent: Option<String>,
    pub tone: String,
    pub subject: String,
    pub email_preview: String,
    pub date: String,
    pub detail: Option<HistoryDetail>,
}

impl HistoryCard {
    pub fn new(entry: &HistoryEntry, expanded: bool) -> Self {
        let reply = &entry.response;
        let detail = expanded.then(|| HistoryDetail {
            original_email: entry.request.original_email.clone(),
            subject: non_empty(&reply.subject_line),
            greeting: reply.greeting.clone().unwrap_or_default(),
            body: render(reply.body.as_deref().unwrap_or_default()),
            closing: reply.closing.clone().unwrap_or_default(),
            signature: reply.signature_placeholder.clone().unwrap_or_default(),
        });

        Self {
            id: entry.id.clone(),
            intent: non_empty(&reply.detected_intent),
            tone: entry.request.tone.clone(),
            subject: reply
                .subject_line
                .clone()
                .unwrap_or_else(|| NO_SUBJECT.to_string()),
            email_preview: preview(&entry.request.original_email, EMAIL_PREVIEW_GRAPHEMES),
            date: format_card_date(entry),
            detail,
        }
    }
}

/// `Feb 14, 2026, 09:30 AM` in UTC, or the stored timestamp when it does not
/// parse.
pub fn format_card_date(entry: &HistoryEntry) -> String {
    let format = format_description!(
        "[month repr:short] [day padding:none], [year], [hour repr:12]:[minute] [period]"
    );
    entry
        .created_at()
        .and_then(|created_at| created_at.format(format).ok())
        .unwrap_or_else(|| entry.timestamp.clone())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|value| !value.is_empty()).map(str::to_string)
}
