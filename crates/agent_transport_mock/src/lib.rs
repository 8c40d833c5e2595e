//! Deterministic mock implementation of the `agent_transport` contract.
//!
//! No network access happens here. Outcomes are scripted up front and replayed
//! in order; once the script runs out the transport answers with a canned
//! sample reply.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use agent_transport::{AgentCallResult, AgentTransport, TransportError};
use serde_json::{json, Value};

/// Stable identifier for the mock agent.
pub const MOCK_AGENT_ID: &str = "mock-agent";

/// One scripted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedOutcome {
    /// Call completes with `success: true` and this `response` payload.
    Respond(Value),
    /// Call completes with `success: false`.
    AgentFailure(Option<String>),
    /// Call does not complete.
    TransportFailure(String),
    /// The transport panics mid-call.
    Panic(String),
}

/// Recorded call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub message: String,
    pub agent_id: String,
}

#[derive(Debug)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Duration,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new(outcomes: Vec<ScriptedOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Sleeps for `delay` inside every call before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Calls observed so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock_unpoisoned(&self.calls).clone()
    }

    /// Number of scripted outcomes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        lock_unpoisoned(&self.script).len()
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AgentTransport for ScriptedTransport {
    fn call(&self, message: &str, agent_id: &str) -> Result<AgentCallResult, TransportError> {
        lock_unpoisoned(&self.calls).push(RecordedCall {
            message: message.to_string(),
            agent_id: agent_id.to_string(),
        });

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let next = lock_unpoisoned(&self.script).pop_front();
        match next {
            Some(ScriptedOutcome::Respond(response)) => Ok(AgentCallResult::success(response)),
            Some(ScriptedOutcome::AgentFailure(error)) => Ok(AgentCallResult::failure(error)),
            Some(ScriptedOutcome::TransportFailure(error)) => Err(TransportError::new(error)),
            Some(ScriptedOutcome::Panic(message)) => panic!("{message}"),
            None => Ok(AgentCallResult::success(sample_response())),
        }
    }
}

/// Canned reply in the string-encoded shape real agents tend to return.
#[must_use]
pub fn sample_response() -> Value {
    json!({ "result": sample_reply_json().to_string() })
}

/// Structured sample reply for a complaint about a wrong item.
#[must_use]
pub fn sample_reply_json() -> Value {
    json!({
        "detected_intent": "complaint",
        "is_sensitive": false,
        "sensitivity_reason": "",
        "subject_line": "Re: Order #ORD-20240315-7892 - Resolution for Incorrect Item Received",
        "greeting": "Dear Mr. Chen,",
        "body": "Thank you for bringing this matter to our attention and for your continued loyalty over the past three years. We sincerely apologize for the inconvenience caused by receiving the incorrect product.\n\nWe have reviewed your order #ORD-20240315-7892 and confirmed that an error occurred during the fulfillment process. We take full responsibility for this oversight and would like to offer you the following resolution:\n\n1. An immediate shipment of the correct Premium Wireless Headphones (Model WH-1000X) in Midnight Black via expedited shipping at no additional cost.\n2. A prepaid return label will be sent to your registered email address within the next 2 hours for returning the incorrect item.\n3. A 15% discount code for your next purchase as a token of our appreciation for your patience and understanding.\n\nPlease rest assured that we value your business and are committed to resolving this matter promptly. If you have any additional questions or concerns, please do not hesitate to reach out directly.",
        "closing": "We appreciate your patience and look forward to making this right.",
        "signature_placeholder": "[Your Name]\nCustomer Relations Manager\n[Company Name]",
        "confidence_score": 92
    })
}

/// Incoming email matching [`sample_reply_json`].
pub const SAMPLE_EMAIL: &str = "Dear Customer Service Team,

I am writing to express my deep frustration with the recent order #ORD-20240315-7892 placed on March 15, 2024. The product I received was significantly different from what was advertised on your website.

Specifically, I ordered the Premium Wireless Headphones (Model WH-1000X) in Midnight Black, but instead received a completely different model (Basic Wired Earbuds) in white. This is unacceptable and does not meet the standards I expected from your company.

I have been a loyal customer for over 3 years and have made numerous purchases without any issues until now. I expect a full refund or an immediate replacement of the correct product, along with a prepaid return label for the wrong item.

If this matter is not resolved within 5 business days, I will be forced to escalate this issue through consumer protection channels and leave detailed reviews of my experience.

I look forward to your prompt response.

Regards,
Michael Chen
Order #ORD-20240315-7892";

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_outcomes_replay_in_order() {
        let transport = ScriptedTransport::new(vec![
            ScriptedOutcome::Respond(json!({ "result": { "greeting": "Hi" } })),
            ScriptedOutcome::AgentFailure(Some("busy".to_string())),
            ScriptedOutcome::TransportFailure("offline".to_string()),
        ]);

        let first = transport.call("one", MOCK_AGENT_ID).expect("first call completes");
        assert!(first.success);
        assert_eq!(first.response, Some(json!({ "result": { "greeting": "Hi" } })));

        let second = transport.call("two", MOCK_AGENT_ID).expect("second call completes");
        assert!(!second.success);
        assert_eq!(second.error.as_deref(), Some("busy"));

        let third = transport
            .call("three", MOCK_AGENT_ID)
            .expect_err("third call fails in transport");
        assert_eq!(third.message(), "offline");
        assert_eq!(transport.remaining(), 0);
    }

    #[test]
    fn exhausted_script_falls_back_to_sample() {
        let transport = ScriptedTransport::default();
        let result = transport.call("prompt", MOCK_AGENT_ID).expect("call completes");
        assert_eq!(result.response, Some(sample_response()));
    }

    #[test]
    fn calls_are_recorded_with_agent_id() {
        let transport = ScriptedTransport::default();
        let _ = transport.call("hello", "agent-9");
        assert_eq!(
            transport.calls(),
            vec![RecordedCall {
                message: "hello".to_string(),
                agent_id: "agent-9".to_string(),
            }]
        );
    }

    #[test]
    fn sample_texts_keep_their_paragraphs() {
        let paragraphs: Vec<&str> = SAMPLE_EMAIL.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 7);
        assert!(paragraphs[3].starts_with("I have been a loyal customer"));
        assert!(paragraphs[6].ends_with("Order #ORD-20240315-7892"));

        let reply = sample_reply_json();
        let body = reply["body"].as_str().expect("body is a string");
        let blocks: Vec<&str> = body.split("\n\n").collect();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[2].lines().count(), 3);
        assert!(blocks[3].starts_with("Please rest assured"));
        assert!(!body.contains("**"));
    }

    #[test]
    fn sample_response_wraps_reply_as_string() {
        let response = sample_response();
        let encoded = response["result"].as_str().expect("result is a string");
        let decoded: Value = serde_json::from_str(encoded).expect("string holds json");
        assert_eq!(decoded, sample_reply_json());
    }
}
