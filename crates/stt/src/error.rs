use thiserror::Error;
use vocalis_core::UpstreamFailure;

pub type Result<T> = std::result::Result<T, SttError>;

/// Speech-to-text failures
#[derive(Debug, Error)]
pub enum SttError {
    /// Upstream rejected the request parameters or audio
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream rejected the API key
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Upstream answered with another non-success status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network, TLS, or timeout failure
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Upstream answered 2xx with a body we could not read
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Audio could not be written to or read from the staging area
    #[error("Audio staging failed: {0}")]
    Staging(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<UpstreamFailure> for SttError {
    fn from(failure: UpstreamFailure) -> Self {
        if failure.is_auth() {
            Self::AuthenticationFailed(failure.message())
        } else if failure.is_bad_request() {
            Self::InvalidRequest(failure.message())
        } else {
            Self::ProviderApiError {
                status: failure.status.as_u16(),
                message: failure.message(),
            }
        }
    }
}
