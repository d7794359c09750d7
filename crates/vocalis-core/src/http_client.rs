use std::time::Duration;

use http::{HeaderMap, HeaderValue, header};
use reqwest::Client;
use thiserror::Error;

/// Failure to construct an upstream HTTP client
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct HttpClientError(#[from] reqwest::Error);

/// Build the connection pool for one upstream
///
/// Each adapter builds its client once at startup and reuses it for every
/// job. `timeout` bounds a whole request, body included.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn http_client(timeout: Duration) -> Result<Client, HttpClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    let client = Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()?;

    Ok(client)
}
