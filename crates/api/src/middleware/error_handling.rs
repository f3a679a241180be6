//! # Error Handling Middleware
//!
//! Maps the engine's typed error kinds to HTTP status codes and JSON error
//! responses, so every endpoint fails the same way. All engine errors are
//! recoverable; none of them take the server down.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::errors::EngineError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// Wraps [`EngineError`] and implements `IntoResponse`, which lets handlers
/// return `Result<_, AppError>` and use `?` on engine calls.
#[derive(Debug)]
pub struct AppError(pub EngineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error kinds to HTTP status codes
        let status = match &self.0 {
            EngineError::InvalidSlotFormat(_) => StatusCode::BAD_REQUEST,
            EngineError::DuplicateSlot(_) => StatusCode::BAD_REQUEST,
            EngineError::Validation(_) => StatusCode::BAD_REQUEST,
            EngineError::SlotTaken { .. } => StatusCode::CONFLICT,
            EngineError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError(err)
    }
}
