use async_trait::async_trait;
use ideaforge_core::{GenerationRequest, GenerationResponse, Idea};
use reqwest::{Client, RequestBuilder, StatusCode};

use crate::{IdeaService, ServiceError};

/// Async HTTP client for a running ideaforge-server.
pub struct HttpService {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            api_key: None,
        }
    }

    /// Send `key` as the bearer credential expected by the hosting ingress.
    pub fn with_api_key(base_url: &str, key: String) -> Self {
        Self {
            api_key: Some(key),
            ..Self::new(base_url)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {key}")),
            None => builder,
        }
    }
}

/// Turn a gateway reply into ideas or the most useful error available.
fn interpret(status: StatusCode, body: &str) -> Result<Vec<Idea>, ServiceError> {
    let parsed = serde_json::from_str::<GenerationResponse>(body);

    if !status.is_success() {
        let msg = match parsed {
            Ok(GenerationResponse::Error { error }) => error,
            _ => String::new(),
        };
        return Err(if status == StatusCode::BAD_REQUEST {
            ServiceError::InvalidInput(msg)
        } else if msg.is_empty() {
            ServiceError::MalformedResponse(format!("status {status}"))
        } else {
            ServiceError::Server(msg)
        });
    }

    match parsed {
        Ok(GenerationResponse::Ideas { ideas }) => Ok(ideas),
        Ok(GenerationResponse::Error { error }) => Err(ServiceError::Server(error)),
        Err(e) => Err(ServiceError::MalformedResponse(format!("json decode: {e}"))),
    }
}

#[async_trait]
impl IdeaService for HttpService {
    /// Health endpoint is not authenticated.
    async fn health_check(&self) -> Result<(), ServiceError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ServiceError::Server(format!(
                "health check failed: {}",
                resp.status()
            )))
        }
    }

    async fn generate_ideas(&self, request: &GenerationRequest) -> Result<Vec<Idea>, ServiceError> {
        let builder = self
            .client
            .post(format!("{}/generate-idea", self.base_url))
            .json(request);
        let resp = self
            .with_auth(builder)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ServiceError::Transport(format!("read body: {e}")))?;
        interpret(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideas_body_is_success() {
        let ideas = interpret(StatusCode::OK, r#"{"ideas":[{"title":"A"},{"title":"B"}]}"#).unwrap();
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[1].title, "B");
    }

    #[test]
    fn null_and_decimal_fields_keep_every_idea() {
        let body = r#"{"ideas":[
            {"title":"A","persona":null},
            {"title":"B","feasibility":{"technical":7.5,"time_days":3,"market_fit":8}},
            {"title":"C"}
        ]}"#;
        let ideas = interpret(StatusCode::OK, body).unwrap();
        assert_eq!(ideas.len(), 3);
        assert_eq!(ideas[0].persona, "");
        assert_eq!(ideas[1].feasibility.technical, 7.5);
        assert_eq!(ideas[2].title, "C");
    }

    #[test]
    fn error_body_on_success_status_is_server_error() {
        let err = interpret(StatusCode::OK, r#"{"error":"could not produce json"}"#).unwrap_err();
        assert_eq!(err.user_message(), "could not produce json");
    }

    #[test]
    fn non_array_ideas_is_malformed() {
        let err = interpret(StatusCode::OK, r#"{"ideas":"soon"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
        assert_eq!(err.user_message(), crate::GENERIC_FAILURE);
    }

    #[test]
    fn missing_ideas_is_malformed() {
        let err = interpret(StatusCode::OK, "{}").unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[test]
    fn bad_request_keeps_message() {
        let err = interpret(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Missing required fields: domain, audience, difficulty, time_available_days, mode"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(err.user_message().starts_with("Missing required fields"));
    }

    #[test]
    fn server_error_without_json_is_generic() {
        let err = interpret(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.user_message(), crate::GENERIC_FAILURE);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(HttpService::new("http://x:1/").base_url(), "http://x:1");
    }
}
