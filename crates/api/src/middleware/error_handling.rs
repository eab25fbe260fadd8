//! # Error Handling Middleware
//!
//! Maps booking errors to HTTP status codes and JSON error bodies, so every
//! handler reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roombook_core::errors::BookingError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping.
///
/// | error          | status |
/// |----------------|--------|
/// | `Validation`   | 400    |
/// | `NotFound`     | 404    |
/// | `Conflict`     | 409    |
/// | `Store`        | 500    |
/// | `Notification` | 500    |
///
/// Internal failures are logged in full and answered with a generic message.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::Validation { .. } => StatusCode::BAD_REQUEST,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Store(_) | BookingError::Notification(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self.0 {
            BookingError::Validation { field, reason } => json!({
                "error": self.0.to_string(),
                "field": field,
                "reason": reason,
            }),
            BookingError::Conflict(message) | BookingError::NotFound(message) => {
                json!({ "error": message })
            }
            BookingError::Store(_) | BookingError::Notification(_) => {
                error!(error = ?self.0, "request failed");
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `BookingResult` values inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Wraps plumbing failures as store errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Store(err))
    }
}

/// Maps a BookingError straight to an HTTP response.
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
