use http::StatusCode;

/// Longest upstream error body kept in an error message
const MAX_MESSAGE_CHARS: usize = 512;

/// Non-success answer from an upstream API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamFailure {
    pub status: StatusCode,
    /// Full response body, surrounding whitespace trimmed
    pub body: String,
}

impl UpstreamFailure {
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.trim().to_string(),
        }
    }

    /// Body fit for an error message
    pub fn message(&self) -> String {
        self.message_with(str::to_string)
    }

    /// Message pulled out of the full body by `extract`, then shortened
    ///
    /// An empty extraction falls back to the status reason.
    pub fn message_with(&self, extract: impl FnOnce(&str) -> String) -> String {
        let message = extract(&self.body);
        let message = message.trim();

        if message.is_empty() {
            self.status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else if message.chars().count() > MAX_MESSAGE_CHARS {
            let mut truncated: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
            truncated.push_str("...");
            truncated
        } else {
            message.to_string()
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self.status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
    }

    pub fn is_bad_request(&self) -> bool {
        self.status == StatusCode::BAD_REQUEST || self.status == StatusCode::UNPROCESSABLE_ENTITY
    }
}

/// Drain a failed response into an [`UpstreamFailure`]
///
/// The whole body is kept; [`UpstreamFailure::message`] shortens it for
/// error messages.
pub async fn read_failure(response: reqwest::Response) -> UpstreamFailure {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    UpstreamFailure::new(status, &body)
}
