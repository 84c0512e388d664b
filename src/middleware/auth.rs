//! API secret key authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Read the `Authorization` header
//! 2. Compare it against `Token <configured secret>`
//! 3. Reject mismatches with HTTP 401 without running the rest of the chain
//!
//! An empty configured secret disables the check entirely.

use crate::{
    constants::{AUTHORIZATION_PREFIX_TOKEN, HTTP_HEADER_AUTHORIZATION},
    error::AppError,
};
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Authentication state built once from the configured secret.
///
/// Only the SHA-256 digest of the expected header value is kept, so the
/// secret itself does not live on in the router state.
#[derive(Clone)]
pub struct ApiSecretKey {
    /// Hex digest of `"Token <secret>"`, `None` when authentication is disabled
    expected_hash: Option<String>,
}

impl ApiSecretKey {
    pub fn new(secret: &str) -> Self {
        if secret.is_empty() {
            return Self {
                expected_hash: None,
            };
        }

        let expected = format!("{} {}", AUTHORIZATION_PREFIX_TOKEN, secret);
        Self {
            expected_hash: Some(hash_header(expected.as_bytes())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.expected_hash.is_some()
    }

    /// Check a raw `Authorization` header value.
    ///
    /// The value must equal the expected one byte for byte: no trimming, no
    /// case folding, no alternative schemes.
    pub fn verify(&self, header: Option<&HeaderValue>) -> Result<(), AppError> {
        let Some(expected_hash) = &self.expected_hash else {
            return Ok(());
        };

        let header = header.ok_or(AppError::Unauthorized)?;

        if hash_header(header.as_bytes()) == *expected_hash {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for ApiSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSecretKey")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn hash_header(value: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value);
    hex::encode(hasher.finalize())
}

/// API secret key authentication middleware function.
///
/// # Flow
///
/// 1. If no secret is configured, call the next handler
/// 2. Otherwise verify `Authorization: Token <secret>`
/// 3. On match, call the next handler
/// 4. On mismatch, return 401 `{"message":"Unauthorized"}`; the next handler is NOT called
///
/// # Arguments
///
/// * `State(key)` - Authentication state injected by Axum
/// * `request` - Incoming HTTP request
/// * `next` - Next middleware/handler in the chain
pub async fn api_secret_key_middleware(
    State(key): State<ApiSecretKey>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(e) = key.verify(request.headers().get(HTTP_HEADER_AUTHORIZATION)) {
        debug!(path = %request.uri().path(), "Auth failed: API secret key mismatch");
        return Err(e);
    }

    Ok(next.run(request).await)
}
