//! Uniform JSON error body shared by every endpoint.
//!
//! ```json
//! { "code": "CATEGORY_EXISTS", "message": "category: Agbada exists" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::ErrorCode;
use crate::domain::media::ImageError;

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `USER_EXISTS`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Builds the final response with `status`.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Body for a domain error code.
pub fn domain_error_body(code: ErrorCode, message: impl Into<String>) -> ErrorResponse {
    ErrorResponse::new(code.to_string(), message)
}

/// Details for a field validation failure.
pub fn field_details(field: &str) -> serde_json::Value {
    serde_json::json!({ "field": field })
}

/// Details for an image batch failure; names the failing index when known.
pub fn image_details(err: &ImageError) -> Option<serde_json::Value> {
    err.index().map(|index| serde_json::json!({ "index": index }))
}

/// Logs a server-side failure before it is turned into a 500.
pub(crate) fn log_server_error(code: ErrorCode, message: &str) {
    tracing::error!(code = %code, error = %message, "Request failed");
}
