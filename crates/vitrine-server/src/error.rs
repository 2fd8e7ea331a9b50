//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`vitrine_core::Error`] so that route
//! handlers can return `Result<T, AppError>` directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError(pub vitrine_core::Error);

impl From<vitrine_core::Error> for AppError {
    fn from(e: vitrine_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.0,
                "Server error in API handler"
            );
        }

        let body = json!({ "error": self.0.to_string() });

        (status, axum::Json(body)).into_response()
    }
}
