use std::sync::Arc;

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::completion::mock::ScriptedBackend;
use crate::completion::CompletionBackend;
use crate::routes::{build_router, InnerAppState};

pub const TEST_MODEL: &str = "test-model";
pub const TEST_MAX_TOKENS: u32 = 4096;

/// Build a router around the given backend.
pub fn test_router(backend: Arc<dyn CompletionBackend>) -> Router {
    build_router(Arc::new(InnerAppState {
        backend,
        model: TEST_MODEL.into(),
        max_completion_tokens: TEST_MAX_TOKENS,
    }))
}

/// A running test server with base_url and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

/// Spawn the gateway on a random port. Returns the TestServer
/// with the `base_url` (e.g. "http://127.0.0.1:12345").
pub async fn spawn_test_server(backend: Arc<dyn CompletionBackend>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let app = test_router(backend);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}

/// Spawn a gateway whose model always answers with `reply`.
pub async fn spawn_scripted_server(reply: &str) -> (TestServer, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::reply(reply));
    let server = spawn_test_server(backend.clone()).await;
    (server, backend)
}

/// A complete, well-formed idea object numbered `n`.
pub fn sample_idea(n: usize) -> Value {
    json!({
        "title": format!("Idea {n}"),
        "tagline": format!("Tagline {n}"),
        "problem": "Students struggle to stay consistent with workouts.",
        "solution": "Short daily challenges with friends and streaks.",
        "features": ["challenges", "streaks", "friends", "reminders", "progress charts"],
        "tech_stack": ["React", "TypeScript", "Vite", "Supabase", "Postgres", "Tailwind"],
        "architecture": "[Mobile Web] --> [API] --> [Postgres]",
        "roadmap": [
            { "phase": "Day 1", "tasks": ["auth", "schema"] },
            { "phase": "Day 2", "tasks": ["challenges", "streaks"] },
            { "phase": "Day 3", "tasks": ["polish", "demo"] }
        ],
        "feasibility": { "technical": 8, "time_days": 3, "market_fit": 7 },
        "persona": "A second-year student with a packed schedule.",
        "monetization": "Freemium with campus gym partnerships.",
        "task_breakdown": [
            { "area": "frontend", "tasks": ["screens"], "estimated_hours": 10 },
            { "area": "backend", "tasks": ["api"], "estimated_hours": 8 },
            { "area": "UI/UX", "tasks": ["flows"], "estimated_hours": 6 }
        ]
    })
}

/// A model reply containing `count` well-formed ideas, fenced the way models often answer.
pub fn ideas_reply(count: usize) -> String {
    let ideas: Vec<Value> = (1..=count).map(sample_idea).collect();
    format!("```json\n{}\n```", json!({ "ideas": ideas }))
}
