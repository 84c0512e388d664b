//! Health check endpoint for service monitoring.

use axum::Json;
use chrono::Utc;

use crate::models::response::HealthResponse;

/// Health check handler.
///
/// Public; never goes through the API secret key check.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "ok",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}
