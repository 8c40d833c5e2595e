//! Minimal contract for sending one prompt to an external agent.
//!
//! Only the call shape lives here. HTTP, auth and timeouts belong to concrete
//! transports; the composer treats them as opaque.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error returned when an agent call did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Creates a new transport error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<String> for TransportError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for TransportError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Completed agent call.
///
/// `success == false` means the agent answered but reported a failure; the
/// optional `error` carries its message. `response` is left untyped because
/// agents wrap their output in loosely-shaped, sometimes string-encoded JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentCallResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentCallResult {
    /// Successful call carrying `response`.
    #[must_use]
    pub fn success(response: impl Into<Value>) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
            error: None,
        }
    }

    /// Call that completed with an agent-reported failure.
    #[must_use]
    pub fn failure(error: Option<String>) -> Self {
        Self {
            success: false,
            response: None,
            error,
        }
    }

    /// The whole result as a JSON value, the shape extraction starts from.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Transport interface for the agent service.
pub trait AgentTransport: Send + Sync + 'static {
    /// Sends `message` to the agent identified by `agent_id` and blocks until
    /// the call completes or fails.
    fn call(&self, message: &str, agent_id: &str) -> Result<AgentCallResult, TransportError>;
}

impl<T: AgentTransport + ?Sized> AgentTransport for Box<T> {
    fn call(&self, message: &str, agent_id: &str) -> Result<AgentCallResult, TransportError> {
        (**self).call(message, agent_id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{AgentCallResult, AgentTransport, TransportError};

    struct EchoTransport;

    impl AgentTransport for EchoTransport {
        fn call(&self, message: &str, agent_id: &str) -> Result<AgentCallResult, TransportError> {
            if agent_id.is_empty() {
                return Err(TransportError::new("missing agent id"));
            }
            Ok(AgentCallResult::success(json!({ "result": message })))
        }
    }

    #[test]
    fn transport_error_preserves_message() {
        let error = TransportError::from("connection reset");
        assert_eq!(error.message(), "connection reset");
        assert_eq!(error.to_string(), "connection reset");
    }

    #[test]
    fn boxed_transports_forward_calls() {
        let transport: Box<dyn AgentTransport> = Box::new(EchoTransport);
        let result = transport.call("hello", "agent-1").expect("call should succeed");
        assert!(result.success);
        assert_eq!(result.response, Some(json!({ "result": "hello" })));

        let error = transport.call("hello", "").expect_err("empty agent id must fail");
        assert_eq!(error.message(), "missing agent id");
    }

    #[test]
    fn result_value_omits_absent_fields() {
        let value = AgentCallResult::failure(None).to_value();
        assert_eq!(value, json!({ "success": false }));

        let value = AgentCallResult::success(json!({ "result": "x" })).to_value();
        assert_eq!(value, json!({ "success": true, "response": { "result": "x" } }));
    }

    #[test]
    fn result_decodes_loose_agent_envelopes() {
        let decoded: AgentCallResult = serde_json::from_value(json!({
            "success": false,
            "error": "quota exceeded",
            "extra": 1
        }))
        .expect("envelope should decode");
        assert_eq!(
            decoded,
            AgentCallResult::failure(Some("quota exceeded".to_string()))
        );
    }
}
