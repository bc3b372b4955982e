use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ideaforge_core::{RecoveryError, RequestError};
use serde_json::json;
use thiserror::Error;

const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Everything the generation handler can fail with, mapped to a status and
/// a single-line `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Provider answered with a non-2xx status. The provider body is never relayed.
    #[error("{provider} API error: {status}")]
    Upstream { provider: String, status: u16 },

    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Request(RequestError::MissingFields) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            msg
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
