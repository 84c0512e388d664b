//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.
//! It also owns [`RecordedErrors`], the per-response list of private error
//! messages that the request logger reports.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::response::ResponseError;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and public message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// `Authorization` header does not carry the configured secret.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Unauthorized")]
    Unauthorized,

    /// No route matched the request.
    ///
    /// Returns HTTP 404 Not Found. The String is the private detail.
    #[error("Not Found")]
    NotFound(String),

    /// Unexpected failure inside a handler.
    ///
    /// Returns HTTP 500 Internal Server Error (hides details from client).
    #[error("Internal Server Error")]
    Internal(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// { "message": "Unauthorized" }
/// ```
///
/// # Status Code Mapping
///
/// - `Unauthorized` → 401 Unauthorized
/// - `NotFound` → 404 Not Found
/// - `Internal` → 500 Internal Server Error
///
/// `NotFound` and `Internal` attach their private detail to the response as
/// [`RecordedErrors`] so it ends up in the request log, never in the body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, private) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, None),
            AppError::NotFound(detail) => (StatusCode::NOT_FOUND, Some(detail.clone())),
            AppError::Internal(detail) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some(detail.clone()))
            }
        };

        let body = Json(ResponseError {
            message: self.to_string(),
        });

        let mut response = (status, body).into_response();
        if let Some(detail) = private {
            record_error(&mut response, detail);
        }
        response
    }
}

/// Private error messages recorded while producing a response.
///
/// Stored as a response extension. Handlers and middleware append to it with
/// [`record_error`]; the request logger reads it once the chain completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedErrors(Vec<String>);

impl RecordedErrors {
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// Numbered, one per line: `Error #01: first`.
impl fmt::Display for RecordedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Error #{:02}: {}", i + 1, message)?;
        }
        Ok(())
    }
}

/// Append a private error message to a response.
pub fn record_error(response: &mut Response, message: impl Into<String>) {
    let extensions = response.extensions_mut();
    match extensions.get_mut::<RecordedErrors>() {
        Some(errors) => errors.push(message),
        None => {
            let mut errors = RecordedErrors::default();
            errors.push(message);
            extensions.insert(errors);
        }
    }
}
