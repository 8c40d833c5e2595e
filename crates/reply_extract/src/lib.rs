//! Structured reply extraction for agent results.
//!
//! Agents return their reply in several loose shapes: a ready JSON object, a
//! string holding JSON wrapped in prose or code fences, an object nesting the
//! reply under `result`, or an object whose `text` field holds the JSON.
//! [`extract`] walks those shapes in a fixed order and never fails on
//! malformed input; it returns `None` when nothing usable is found.

pub mod extract;
pub mod lenient;
pub mod lenient_json;
pub mod reply;

pub use extract::{extract, extract_object};
pub use lenient_json::parse_lenient;
pub use reply::EmailReply;
