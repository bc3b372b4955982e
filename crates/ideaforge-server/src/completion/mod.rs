pub mod mock;
pub mod openai;

use async_trait::async_trait;
use ideaforge_core::chat::ChatRequest;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    /// Provider answered with a non-success status.
    #[error("API error: {status}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected completion response: {0}")]
    InvalidResponse(String),
}

/// A text-completion provider.
///
/// Implementations send one request and return the text of the first choice.
/// They do not retry, stream, or interpret the text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Provider name, used in upstream error messages and logs.
    fn name(&self) -> &str;

    async fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError>;
}
