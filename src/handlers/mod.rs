//! HTTP request handlers (route handlers).

/// Liveness endpoint
pub mod health;
/// Authenticated service status and the 404 fallback
pub mod status;
