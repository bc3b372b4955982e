pub mod generate;
pub mod health;

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderValue, Method, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::completion::CompletionBackend;

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub struct InnerAppState {
    pub backend: Arc<dyn CompletionBackend>,
    pub model: String,
    pub max_completion_tokens: u32,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(generate::routes())
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answer preflight requests directly and stamp permissive CORS headers on
/// every response, errors included.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}
