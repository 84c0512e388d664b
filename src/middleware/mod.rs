//! HTTP middleware components.
//!
//! Middleware are functions that wrap route handlers.
//! They can:
//! - Authenticate requests
//! - Log requests
//! - Short-circuit requests (reject unauthorized)

/// API secret key authentication middleware
pub mod auth;
/// Per-request structured logging middleware
pub mod logging;

pub use auth::{ApiSecretKey, api_secret_key_middleware};
pub use logging::request_logger;
