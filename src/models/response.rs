//! JSON response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned for every failed request.
///
/// ```json
/// { "message": "Unauthorized" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Authenticated status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: String,
    pub version: String,

    /// Whether an API secret key is configured
    pub auth_enabled: bool,
}
