use agent_transport_mock::{sample_reply_json, SAMPLE_EMAIL};
use history_store::{HistoryEntry, HistoryStore};
use reply_extract::EmailReply;
use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::error::GenerateError;
use crate::prompt::{build_prompt, ReplyLength, ReplyRequest, Tone};
use crate::reply_text::{full_reply_text, history_reply_text};
use crate::view::{HistoryCard, ReplyPreview};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Requesting { request_id: RequestId },
    Failed(GenerateError),
    /// The request worker crashed. Cleared with [`App::reset_fault`].
    Faulted(String),
}

pub trait HostOps {
    fn start_request(&mut self, message: String) -> Result<RequestId, String>;
    fn request_render(&mut self);
}

const NOTICE_ALREADY_GENERATING: &str = "A reply is already being generated.";

#[derive(Debug)]
pub struct App {
    pub form: ReplyRequest,
    pub mode: Mode,
    reply: Option<EmailReply>,
    editable_body: String,
    editing: bool,
    submitted: Option<ReplyRequest>,
    notice: Option<String>,
    show_sample: bool,
    history: HistoryStore,
    search_query: String,
    expanded_history_id: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(HistoryStore::in_memory())
    }
}

impl App {
    pub fn new(history: HistoryStore) -> Self {
        Self {
            form: ReplyRequest::default(),
            mode: Mode::Idle,
            reply: None,
            editable_body: String::new(),
            editing: false,
            submitted: None,
            notice: None,
            show_sample: false,
            history,
            search_query: String::new(),
            expanded_history_id: None,
        }
    }

    pub fn reply(&self) -> Option<&EmailReply> {
        self.reply.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn editable_body(&self) -> &str {
        &self.editable_body
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.mode, Mode::Requesting { .. })
    }

    /// User-facing text for the last failed generate call.
    pub fn error_message(&self) -> Option<String> {
        match &self.mode {
            Mode::Failed(error) => Some(error.to_string()),
            _ => None,
        }
    }

    /// Transient notice, such as a rejected second generate.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_requesting() {
            "Processing..."
        } else {
            "Ready"
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn show_sample(&self) -> bool {
        self.show_sample
    }

    pub fn on_generate(&mut self, host: &mut dyn HostOps) {
        let request = self.form.clone();
        self.submit(request, host);
    }

    /// Re-issues the last submitted request, or the current form when nothing
    /// was submitted yet.
    pub fn on_retry(&mut self, host: &mut dyn HostOps) {
        let request = self.submitted.clone().unwrap_or_else(|| self.form.clone());
        self.submit(request, host);
    }

    fn submit(&mut self, request: ReplyRequest, host: &mut dyn HostOps) {
        self.notice = None;

        if self.is_requesting() {
            self.notice = Some(NOTICE_ALREADY_GENERATING.to_string());
            host.request_render();
            return;
        }

        if !request.has_email() {
            self.mode = Mode::Failed(GenerateError::InputEmpty);
            host.request_render();
            return;
        }

        self.reply = None;
        let message = build_prompt(&request);
        match host.start_request(message) {
            Ok(request_id) => {
                info!(request_id, tone = %request.tone, length = %request.length, "reply requested");
                self.submitted = Some(request);
                self.mode = Mode::Requesting { request_id };
            }
            Err(error) => {
                warn!(%error, "failed to start reply request");
                self.submitted = Some(request);
                self.mode = Mode::Faulted(error);
            }
        }

        host.request_render();
    }

    pub fn on_request_completed(
        &mut self,
        request_id: RequestId,
        outcome: Result<EmailReply, GenerateError>,
    ) {
        if !self.is_active_request(request_id) {
            debug!(request_id, "ignoring stale request completion");
            return;
        }

        match outcome {
            Ok(reply) => {
                info!(request_id, "reply generated");
                self.record_history(&reply);
                // An empty body leaves the edit buffer as it was.
                if let Some(body) = reply.body.as_deref().filter(|body| !body.is_empty()) {
                    self.editable_body = body.to_string();
                }
                self.reply = Some(reply);
                self.mode = Mode::Idle;
            }
            Err(error) => {
                info!(request_id, %error, "reply generation failed");
                self.mode = Mode::Failed(error);
            }
        }
    }

    pub fn on_request_faulted(&mut self, request_id: RequestId, message: &str) {
        if !self.is_active_request(request_id) {
            debug!(request_id, "ignoring stale request fault");
            return;
        }

        self.mode = Mode::Faulted(message.to_string());
    }

    pub fn reset_fault(&mut self) {
        if matches!(self.mode, Mode::Faulted(_)) {
            self.mode = Mode::Idle;
        }
    }

    fn is_active_request(&self, request_id: RequestId) -> bool {
        matches!(self.mode, Mode::Requesting { request_id: current } if current == request_id)
    }

    fn record_history(&mut self, reply: &EmailReply) {
        let request = self.submitted.as_ref().unwrap_or(&self.form).to_snapshot();
        match HistoryEntry::new(request, reply.clone()) {
            Ok(entry) => self.history.append(entry),
            Err(error) => warn!(%error, "skipping history entry"),
        }
    }

    /// Flips between the rendered body and raw editing. No-op without a reply.
    pub fn toggle_editing(&mut self) {
        if self.reply.is_some() {
            self.editing = !self.editing;
        }
    }

    pub fn on_body_edit(&mut self, text: impl Into<String>) {
        self.editable_body = text.into();
    }

    /// Copies the current reply, using the edited body while editing.
    pub fn copy_reply(&self, clipboard: &dyn Clipboard) -> bool {
        let Some(reply) = self.reply.as_ref() else {
            return false;
        };

        let body_override = self.editing.then_some(self.editable_body.as_str());
        clipboard.copy(&full_reply_text(reply, body_override))
    }

    pub fn reply_preview(&self) -> Option<ReplyPreview> {
        let body_override = self.editing.then_some(self.editable_body.as_str());
        self.reply
            .as_ref()
            .map(|reply| ReplyPreview::new(reply, body_override))
    }

    /// Resets the form, reply, edit state and error. An in-flight request keeps
    /// running and still lands when it completes.
    pub fn clear_all(&mut self) {
        self.form = ReplyRequest::default();
        self.reply = None;
        self.editable_body.clear();
        self.editing = false;
        self.notice = None;
        self.show_sample = false;
        if matches!(self.mode, Mode::Failed(_)) {
            self.mode = Mode::Idle;
        }
    }

    /// Fills the form and output with a canned complaint and reply, or clears
    /// them again when switched off.
    pub fn set_show_sample(&mut self, show: bool) {
        if !show {
            self.clear_all();
            return;
        }

        self.show_sample = true;
        self.form = ReplyRequest {
            original_email: SAMPLE_EMAIL.to_string(),
            sender_name: "Michael Chen".to_string(),
            designation: "Customer".to_string(),
            company_name: "Tech Gadgets Inc.".to_string(),
            tone: Tone::Formal,
            length: ReplyLength::Detailed,
            context_notes: "Customer has been loyal for 3 years. Prioritize retention.".to_string(),
        };

        let reply = match sample_reply_json() {
            serde_json::Value::Object(object) => EmailReply::from_object(&object),
            _ => EmailReply::default(),
        };
        self.editable_body = reply.body.clone().unwrap_or_default();
        self.reply = Some(reply);
    }

    pub fn delete_history(&mut self, id: &str) -> bool {
        if self.expanded_history_id.as_deref() == Some(id) {
            self.expanded_history_id = None;
        }
        self.history.remove(id)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn toggle_history_expanded(&mut self, id: &str) {
        if self.expanded_history_id.as_deref() == Some(id) {
            self.expanded_history_id = None;
        } else {
            self.expanded_history_id = Some(id.to_string());
        }
    }

    /// History entries matching the search query, newest first.
    pub fn visible_history(&self) -> Vec<&HistoryEntry> {
        self.history.search(&self.search_query)
    }

    pub fn history_cards(&self) -> Vec<HistoryCard> {
        self.visible_history()
            .into_iter()
            .map(|entry| {
                let expanded = self.expanded_history_id.as_deref() == Some(entry.id.as_str());
                HistoryCard::new(entry, expanded)
            })
            .collect()
    }

    pub fn copy_history_reply(&self, id: &str, clipboard: &dyn Clipboard) -> bool {
        match self.history.get(id) {
            Some(entry) => clipboard.copy(&history_reply_text(&entry.response)),
            None => false,
        }
    }
}
