use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Structured failure body returned whenever the store errors out. Every
/// request gets a real status code and a JSON body, never a dropped
/// response.
#[derive(Debug, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self { message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.message, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(self)).into_response()
    }
}
