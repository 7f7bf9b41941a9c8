//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use hopemarket::HopeError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Error from the hopemarket library.
    Data(HopeError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Data(e @ (HopeError::EmptyData(_) | HopeError::MissingColumns { .. })) => {
                (StatusCode::NOT_FOUND, "no_data", e.to_string())
            }
            ApiError::Data(e) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string()),
        };

        tracing::warn!(%status, error, %message, "request failed");

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<HopeError> for ApiError {
    fn from(err: HopeError) -> Self {
        ApiError::Data(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Data(e) => write!(f, "Data error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
