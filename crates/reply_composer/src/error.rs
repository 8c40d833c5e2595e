use agent_transport::{AgentCallResult, TransportError};
use reply_extract::EmailReply;
use thiserror::Error;

const AGENT_FAILURE_FALLBACK: &str = "Failed to generate reply. Please try again.";

/// Why a generate call produced no reply. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Please paste an email to generate a reply.")]
    InputEmpty,

    /// The call did not complete. Carries the transport's own message for logs.
    #[error("Network error. Please check your connection and try again.")]
    TransportFailure(String),

    #[error("{}", agent_failure_message(.0.as_deref()))]
    AgentReportedFailure(Option<String>),

    #[error("Could not parse the agent response. Please try again.")]
    UnparsableResponse,
}

impl GenerateError {
    pub fn transport(error: &TransportError) -> Self {
        Self::TransportFailure(error.message().to_string())
    }
}

fn agent_failure_message(error: Option<&str>) -> &str {
    match error {
        Some(error) if !error.trim().is_empty() => error,
        _ => AGENT_FAILURE_FALLBACK,
    }
}

/// Classifies a finished transport call into a reply or a [`GenerateError`].
pub fn interpret_call(
    outcome: Result<AgentCallResult, TransportError>,
) -> Result<EmailReply, GenerateError> {
    let result = outcome.map_err(|error| GenerateError::transport(&error))?;
    if !result.success {
        return Err(GenerateError::AgentReportedFailure(result.error));
    }

    reply_extract::extract(&result.to_value()).ok_or(GenerateError::UnparsableResponse)
}
