//! Structured error responses shared by all HTTP surfaces.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error envelope returned by every non-2xx JSON response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short machine-readable error kind, e.g. `"BadRequest"`
    pub error: String,
    /// Human-readable description
    pub message: String,
    /// Optional structured detail (validation failures per field)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::new(
        "NotFound",
        "The requested resource was not found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}
