//! Shared constants.

/// Header carrying the API secret key.
pub const HTTP_HEADER_AUTHORIZATION: &str = "Authorization";

/// Scheme prefix expected in front of the secret: `Token <secret>`.
pub const AUTHORIZATION_PREFIX_TOKEN: &str = "Token";

/// Value of the `module` field on request log events.
pub const LOG_MODULE_HTTP: &str = "axum";

/// Headers consulted (in order) when resolving the client IP.
pub const HTTP_HEADER_X_FORWARDED_FOR: &str = "X-Forwarded-For";
pub const HTTP_HEADER_X_REAL_IP: &str = "X-Real-IP";
