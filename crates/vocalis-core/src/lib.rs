//! Shared plumbing for the upstream adapters

#![allow(clippy::must_use_candidate)]

mod http_client;
mod upstream;

pub use http_client::{HttpClientError, http_client};
pub use upstream::{UpstreamFailure, read_failure};
