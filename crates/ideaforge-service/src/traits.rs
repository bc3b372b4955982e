use async_trait::async_trait;
use ideaforge_core::{GenerationRequest, Idea};
use thiserror::Error;

/// Shown when the gateway gave no usable message of its own.
pub const GENERIC_FAILURE: &str = "Failed to generate ideas. Please try again.";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The gateway reported an error message.
    #[error("server error: {0}")]
    Server(String),

    #[error("connection failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ServiceError {
    /// One-line text for the user: the server's own message when it sent one.
    pub fn user_message(&self) -> &str {
        match self {
            ServiceError::InvalidInput(msg) | ServiceError::Server(msg) if !msg.is_empty() => msg.as_str(),
            _ => GENERIC_FAILURE,
        }
    }
}

/// Abstraction over the idea generation gateway.
///
/// The TUI programs against this trait; `HttpService` talks to a running
/// `ideaforge-server`.
#[async_trait]
pub trait IdeaService: Send + Sync {
    async fn health_check(&self) -> Result<(), ServiceError>;

    /// Issue exactly one generation request.
    async fn generate_ideas(&self, request: &GenerationRequest) -> Result<Vec<Idea>, ServiceError>;
}
