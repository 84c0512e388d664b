//! Service status endpoint and unmatched-route fallback.

use axum::{Json, extract::State, http::Uri};

use crate::{error::AppError, middleware::ApiSecretKey, models::response::StatusResponse};

/// Report what is running. Mounted behind the API secret key middleware.
pub async fn service_status(State(key): State<ApiSecretKey>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        auth_enabled: key.is_enabled(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
