use thiserror::Error;
use vocalis_core::UpstreamFailure;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis failures
#[derive(Debug, Error)]
pub enum TtsError {
    /// Upstream rejected the request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream rejected the API key
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Upstream answered with another non-success status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network, TLS, or timeout failure, including a broken audio stream
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Upstream finished the stream without sending any audio
    #[error("Provider returned no audio")]
    EmptyAudio,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<UpstreamFailure> for TtsError {
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
