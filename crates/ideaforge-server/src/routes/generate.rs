use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use ideaforge_core::chat::ChatRequest;
use ideaforge_core::recovery;
use ideaforge_core::GenerationRequest;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::AppState;
use crate::completion::CompletionError;
use crate::error::GatewayError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/generate-idea", post(generate_idea))
}

/// Validate, prompt the model once, and coerce its reply into JSON.
///
/// The body is taken as raw bytes so that an unparseable body is reported as
/// an internal error with the parser's message instead of an extractor rejection.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
async fn generate_idea(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, GatewayError> {
    let req = GenerationRequest::from_json(&body).inspect_err(|e| warn!("rejected request: {e}"))?;

    info!(
        domain = %req.domain,
        mode = %req.mode,
        count = req.idea_count(),
        "generating ideas"
    );

    let chat = ChatRequest {
        model: state.model.clone(),
        messages: ideaforge_prompts::assemble_messages(&req),
        max_completion_tokens: state.max_completion_tokens,
    };

    let provider = state.backend.name();
    let content = state.backend.complete(&chat).await.map_err(|e| match e {
        CompletionError::Status { status, body } => {
            warn!(status, provider, "provider error: {}", truncate(&body, 500));
            GatewayError::Upstream {
                provider: provider.to_string(),
                status,
            }
        }
        other => {
            error!(provider, "completion failed: {other}");
            GatewayError::Internal(other.to_string())
        }
    })?;

    let recovered = recovery::recover_ideas(&content).inspect_err(|e| {
        error!(
            reply_len = content.len(),
            detail = e.detail(),
            "could not recover JSON from model reply"
        );
        debug!("model reply: {content}");
    })?;

    debug!(strategy = recovered.strategy, "recovered model reply");
    Ok(Json(recovered.value))
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use ideaforge_core::chat::Role;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::completion::mock::ScriptedBackend;
    use crate::test_helpers::{ideas_reply, test_router};

    fn valid_body() -> Value {
        json!({
            "domain": "fitness",
            "audience": "students",
            "difficulty": "beginner",
            "time_available_days": 3,
            "mode": "hackathon",
        })
    }

    async fn post(backend: Arc<ScriptedBackend>, body: String) -> (StatusCode, Value) {
        let app = test_router(backend);
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-idea")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn fenced_reply_round_trips() {
        let backend = Arc::new(ScriptedBackend::reply("```json\n{\"ideas\":[]}\n```"));
        let (status, body) = post(backend.clone(), valid_body().to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ideas": [] }));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn prose_wrapped_reply_is_extracted() {
        let backend = Arc::new(ScriptedBackend::reply(
            r#"Sure! {"ideas":[{"title":"Gym Buddy"}]} Hope that helps!"#,
        ));
        let (status, body) = post(backend, valid_body().to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ideas": [{ "title": "Gym Buddy" }] }));
    }

    #[tokio::test]
    async fn reply_without_braces_is_no_json() {
        let backend = Arc::new(ScriptedBackend::reply("Sorry, I can't do that."));
        let (status, body) = post(backend, valid_body().to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "AI did not return valid JSON. Please try again." })
        );
    }

    #[tokio::test]
    async fn invalid_brace_block_is_parse_failure() {
        let backend = Arc::new(ScriptedBackend::reply("Here: {ideas: [broken} end"));
        let (status, body) = post(backend, valid_body().to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "Failed to parse AI response. Please try again." })
        );
    }

    #[tokio::test]
    async fn each_missing_field_is_400_without_model_call() {
        for field in ideaforge_core::request::REQUIRED_FIELDS {
            let backend = Arc::new(ScriptedBackend::reply(&ideas_reply(3)));
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(*field);
            let (status, resp) = post(backend.clone(), body.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
            assert_eq!(
                resp,
                json!({ "error": "Missing required fields: domain, audience, difficulty, time_available_days, mode" })
            );
            assert_eq!(backend.calls(), 0, "no model call when {field} is missing");
        }
    }

    #[tokio::test]
    async fn valid_variants_are_never_rejected_as_missing() {
        let variants = [
            valid_body(),
            json!({
                "domain": "d", "audience": "a", "difficulty": "advanced",
                "time_available_days": 30, "mode": "startup",
                "skills": "go", "constraints": "offline", "multi_idea_count": 5
            }),
            json!({
                "domain": "d", "audience": "a", "difficulty": "x",
                "time_available_days": 1, "mode": "m",
                "skills": null, "constraints": ""
            }),
        ];
        for body in variants {
            let backend = Arc::new(ScriptedBackend::reply("{\"ideas\":[]}"));
            let (status, _) = post(backend.clone(), body.to_string()).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(backend.calls(), 1);
        }
    }

    #[tokio::test]
    async fn provider_status_maps_to_500_without_body() {
        let backend = Arc::new(ScriptedBackend::status(429));
        let (status, body) = post(backend, valid_body().to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "mock API error: 429" }));
    }

    #[tokio::test]
    async fn malformed_body_is_500_with_message() {
        let backend = Arc::new(ScriptedBackend::reply("{}"));
        let (status, body) = post(backend.clone(), "not json".into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn model_error_object_is_relayed_verbatim() {
        let backend = Arc::new(ScriptedBackend::reply(
            r#"{"error": "could not produce json"}"#,
        ));
        let (status, body) = post(backend, valid_body().to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "could not produce json" }));
    }

    #[tokio::test]
    async fn ideas_are_passed_through_unvalidated() {
        let reply = json!({
            "ideas": [{ "title": "X", "feasibility": { "technical": 42 }, "extra": true }]
        });
        let backend = Arc::new(ScriptedBackend::reply(&reply.to_string()));
        let (status, body) = post(backend, valid_body().to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, reply);
    }

    #[tokio::test]
    async fn prompt_uses_configured_model_and_two_messages() {
        let backend = Arc::new(ScriptedBackend::reply(&ideas_reply(3)));
        let mut body = valid_body();
        body["multi_idea_count"] = json!(2);
        let (status, _) = post(backend.clone(), body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let sent = backend.last_request().unwrap();
        assert_eq!(sent.model, crate::test_helpers::TEST_MODEL);
        assert_eq!(sent.max_completion_tokens, crate::test_helpers::TEST_MAX_TOKENS);
        assert_eq!(sent.messages.len(), 2);
        assert_eq!(sent.messages[0].role, Role::System);
        assert!(sent.messages[1].content.starts_with("Generate 2 unique"));
        assert!(sent.messages[1].content.contains("- Skills: Not specified"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
