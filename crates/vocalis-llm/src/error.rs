use thiserror::Error;
use vocalis_core::UpstreamFailure;

/// Errors that can occur during chat completion
#[derive(Debug, Error)]
pub enum LlmError {
    /// Upstream provider answered with a non-success status
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Upstream rejected the API key
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// Upstream rejected the request parameters
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network, TLS, or timeout failure
    #[error("connection error: {0}")]
    Connection(String),

    /// Upstream answered 2xx with a body that is not a chat completion
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Completion contained no text
    #[error("model returned an empty completion")]
    EmptyCompletion,

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<UpstreamFailure> for LlmError {
    fn from(failure: UpstreamFailure) -> Self {
        let message = failure.message_with(crate::protocol::openai::error_message);

        if failure.is_auth() {
            Self::Unauthorized(message)
        } else if failure.is_bad_request() {
            Self::InvalidRequest(message)
        } else {
            Self::Upstream {
                status: failure.status.as_u16(),
                message,
            }
        }
    }
}
