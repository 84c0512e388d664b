//! Gateway authentication server.
//!
//! An Axum server carrying two middlewares:
//!
//! - [`middleware::auth`]: static `Authorization: Token <secret>` check
//! - [`middleware::logging`]: one structured debug event per request
//!
//! [`routes::build_router`] wires them around a public health route and an
//! authenticated status route.

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
