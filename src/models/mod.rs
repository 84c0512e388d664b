//! Data models exchanged over HTTP.

/// JSON response bodies
pub mod response;
