use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use ideaforge_core::chat::ChatRequest;

use super::{CompletionBackend, CompletionError};

enum Script {
    Reply(String),
    Status(u16),
}

/// A backend that returns a canned reply (or status) and records what it was asked.
pub struct ScriptedBackend {
    script: Script,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl ScriptedBackend {
    /// Answer every request with `text` as the model's reply.
    pub fn reply(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    /// Fail every request as if the provider returned `status`.
    pub fn status(status: u16) -> Self {
        Self::new(Script::Status(status))
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Status(status) => Err(CompletionError::Status {
                status: *status,
                body: "scripted failure".into(),
            }),
        }
    }
}
