//! Email reply composer state and request runtime.
//!
//! ## Flow
//!
//! [`App`] holds the composer form, the current reply, edit state and the
//! reply history. UI code mutates `App::form` directly and calls the `on_*`
//! handlers with a [`HostOps`] implementation. [`RuntimeController`] is the
//! production host: it runs one agent request at a time on a worker thread and
//! queues the outcome until the owner calls
//! [`RuntimeController::flush_pending_events`].
//!
//! Contract notes:
//! - At most one request is in flight. A second generate while requesting is
//!   rejected with a notice and does not reach the transport.
//! - Completions for a request id other than the active one are ignored.
//! - A successful generate prepends a history entry and persists the whole
//!   list. Persistence failures are logged and never surface as errors.
//! - A panicking transport puts the app into [`Mode::Faulted`], cleared with
//!   [`App::reset_fault`].

pub mod app;
pub mod bootstrap;
pub mod clipboard;
pub mod error;
pub mod prompt;
pub mod reply_text;
pub mod runtime;
pub mod view;

pub use app::{App, HostOps, Mode, RequestId};
pub use clipboard::Clipboard;
pub use error::{interpret_call, GenerateError};
pub use prompt::{build_prompt, ReplyLength, ReplyRequest, Tone};
pub use reply_text::{full_reply_text, history_reply_text};
pub use runtime::{NoopNotifier, RenderNotifier, RequestEvent, RuntimeController};
pub use view::{BodyView, Confidence, ConfidenceBand, HistoryCard, HistoryDetail, ReplyPreview};
