//! Router construction.

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::{config::Config, handlers, middleware};

/// Build the application router.
///
/// - `/healthz` is public
/// - `/api/*` requires `Authorization: Token <API_SECRET_KEY>` (when a key is configured)
/// - every request, including rejected and unmatched ones, goes through the request logger
pub fn build_router(config: &Config) -> Router {
    let api_key = middleware::ApiSecretKey::new(&config.api_secret_key);

    // Create authenticated routes
    let authenticated_routes = Router::new()
        .route("/api/v1/status", get(handlers::status::service_status))
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            api_key.clone(),
            middleware::api_secret_key_middleware,
        ));

    Router::new()
        // Public routes (no authentication required)
        .route("/healthz", get(handlers::health::health_check))
        // Merge authenticated routes
        .merge(authenticated_routes)
        .fallback(handlers::status::not_found)
        .layer(axum_middleware::from_fn(middleware::request_logger))
        .with_state(api_key)
}
