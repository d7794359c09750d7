//! Provider trait and implementations for LLM backends

pub mod openai;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{CompletionRequest, CompletionResponse};

/// Trait implemented by each LLM provider backend
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Send a non-streaming completion request
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
