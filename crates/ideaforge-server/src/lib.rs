pub mod completion;
pub mod config;
pub mod error;
mod routes;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;

use completion::openai::OpenAiCompatible;
use config::ServerConfig;

pub use routes::{build_router, AppState, InnerAppState};

/// Build the shared state for a real deployment from configuration.
pub fn app_state(config: &ServerConfig) -> AppState {
    let backend = OpenAiCompatible::new(
        &config.completion_url,
        config.provider_api_key.clone(),
        config.provider_name.clone(),
    );
    Arc::new(InnerAppState {
        backend: Arc::new(backend),
        model: config.model.clone(),
        max_completion_tokens: config.max_completion_tokens,
    })
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let app = routes::build_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}
