use async_trait::async_trait;
use ideaforge_core::chat::{ChatRequest, ChatResponse};
use reqwest::Client;

use super::{CompletionBackend, CompletionError};

/// Any endpoint speaking the OpenAI chat-completions protocol.
pub struct OpenAiCompatible {
    client: Client,
    endpoint: String,
    api_key: String,
    provider: String,
}

impl OpenAiCompatible {
    pub fn new(endpoint: &str, api_key: String, provider: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            api_key,
            provider,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompatible {
    fn name(&self) -> &str {
        &self.provider
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = resp
            .json::<ChatResponse>()
            .await
            .map_err(|e| CompletionError::InvalidResponse(format!("json decode: {e}")))?;

        parsed.into_content().ok_or_else(|| {
            CompletionError::InvalidResponse("first choice has no message content".into())
        })
    }
}
