//! Request logging middleware.
//!
//! Wraps the rest of the chain and emits one debug-level event per request
//! once the response is ready. The event has no message; everything lives in
//! fields:
//!
//! | field        | value                                            |
//! |--------------|--------------------------------------------------|
//! | `module`     | always `"axum"`                                  |
//! | `time_start` | RFC 3339 wall-clock time the request arrived     |
//! | `status`     | final response status code                       |
//! | `took`       | elapsed milliseconds (float)                     |
//! | `client_ip`  | see [`client_ip`]                                |
//! | `method`     | HTTP method                                      |
//! | `path`       | raw path, plus `?query` when a query is present  |
//! | `error`      | recorded private errors, omitted when none       |

use std::{
    net::SocketAddr,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request},
    http::{Extensions, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::{
    constants::{HTTP_HEADER_X_FORWARDED_FOR, HTTP_HEADER_X_REAL_IP, LOG_MODULE_HTTP},
    error::RecordedErrors,
};

/// One request's log line, built after the chain completes.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub time_start: DateTime<Utc>,
    pub status: u16,
    pub took: Duration,
    pub client_ip: String,
    pub method: String,
    pub path: String,
    pub error: Option<String>,
}

impl LogRecord {
    pub fn emit(&self) {
        debug!(
            module = LOG_MODULE_HTTP,
            time_start = %self.time_start.to_rfc3339_opts(SecondsFormat::Micros, true),
            status = self.status,
            took = self.took.as_secs_f64() * 1000.0,
            client_ip = %self.client_ip,
            method = %self.method,
            path = %self.path,
            error = self.error.as_deref(),
        );
    }
}

/// Request logging middleware.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let time_start = Utc::now();
    let start = Instant::now();
    let path = log_path(request.uri().path(), request.uri().query());
    let method = request.method().to_string();
    let client_ip = client_ip(request.headers(), request.extensions());

    let response = next.run(request).await;

    let took = start.elapsed();

    let error = response
        .extensions()
        .get::<RecordedErrors>()
        .filter(|errors| !errors.is_empty())
        .map(ToString::to_string);

    LogRecord {
        time_start,
        status: response.status().as_u16(),
        took,
        client_ip,
        method,
        path,
        error,
    }
    .emit();

    response
}

/// Path as logged: `path` alone, or `path?query` when the query is non-empty.
pub fn log_path(path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}

/// Best-effort client address.
///
/// Order: first `X-Forwarded-For` entry, `X-Real-IP`, then the peer address
/// from `ConnectInfo`. Empty when none is available (e.g. in-process tests).
pub fn client_ip(headers: &HeaderMap, extensions: &Extensions) -> String {
    let forwarded = headers
        .get(HTTP_HEADER_X_FORWARDED_FOR)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get(HTTP_HEADER_X_REAL_IP)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::record_error;
    use axum::{
        Router,
        body::Body,
        http::StatusCode,
        middleware::from_fn,
        response::IntoResponse,
        routing::get,
    };
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };
    use tower::ServiceExt;
    use tracing::{
        Event, Subscriber,
        field::{Field, Visit},
    };
    use tracing_subscriber::{
        Layer, layer::Context, layer::SubscriberExt, registry::LookupSpan,
    };

    type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Collects every event's fields as strings.
    struct CaptureLayer {
        events: Captured,
    }

    struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

    impl Visit for FieldVisitor<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{:?}", value));
        }
    }

    impl<S> Layer<S> for CaptureLayer
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.events.lock().unwrap().push(fields);
        }
    }

    /// Events carrying the request-log `module` field, in emission order.
    fn request_events(events: &Captured) -> Vec<HashMap<String, String>> {
        events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.get("module").map(String::as_str) == Some(LOG_MODULE_HTTP))
            .cloned()
            .collect()
    }

    async fn run_logged(app: Router, request: axum::http::Request<Body>) -> (Response, Captured) {
        let events: Captured = Arc::default();
        let subscriber = tracing_subscriber::registry().with(CaptureLayer {
            events: events.clone(),
        });
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = app.oneshot(request).await.unwrap();
        (response, events)
    }

    fn get_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn logged_app() -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .route(
                "/failing",
                get(|| async {
                    let mut response = StatusCode::BAD_GATEWAY.into_response();
                    record_error(&mut response, "upstream refused");
                    response
                }),
            )
            .layer(from_fn(request_logger))
    }

    #[test]
    fn test_log_path_without_query() {
        assert_eq!(log_path("/a/b", None), "/a/b");
        assert_eq!(log_path("/a/b", Some("")), "/a/b");
    }

    #[test]
    fn test_log_path_with_query() {
        assert_eq!(log_path("/a", Some("x=1&y=2")), "/a?x=1&y=2");
    }

    #[test]
    fn test_client_ip_precedence() {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 7], 4242))));

        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, &extensions), "10.0.0.7");

        headers.insert(HTTP_HEADER_X_REAL_IP, "192.168.1.2".parse().unwrap());
        assert_eq!(client_ip(&headers, &extensions), "192.168.1.2");

        headers.insert(
            HTTP_HEADER_X_FORWARDED_FOR,
            " 203.0.113.9 , 10.1.1.1".parse().unwrap(),
        );
        assert_eq!(client_ip(&headers, &extensions), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_unknown() {
        assert_eq!(client_ip(&HeaderMap::new(), &Extensions::new()), "");
    }

    #[tokio::test]
    async fn test_logs_one_event_with_all_fields() {
        let (response, events) = run_logged(logged_app(), get_request("/ok")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let logged = request_events(&events);
        assert_eq!(logged.len(), 1);
        let event = &logged[0];

        assert_eq!(event["status"], "200");
        assert_eq!(event["method"], "GET");
        assert_eq!(event["path"], "/ok");
        assert_eq!(event["client_ip"], "");
        assert!(DateTime::parse_from_rfc3339(&event["time_start"]).is_ok());
        assert!(event["took"].parse::<f64>().unwrap() >= 0.0);
        assert!(!event.contains_key("error"));
        assert!(!event.contains_key("message"));
    }

    #[tokio::test]
    async fn test_logged_path_includes_query() {
        let (_, events) = run_logged(logged_app(), get_request("/ok?code=42&state=x")).await;

        let logged = request_events(&events);
        assert_eq!(logged[0]["path"], "/ok?code=42&state=x");
    }

    #[tokio::test]
    async fn test_logged_path_drops_empty_query() {
        let (_, events) = run_logged(logged_app(), get_request("/ok?")).await;

        let logged = request_events(&events);
        assert_eq!(logged[0]["path"], "/ok");
    }

    #[tokio::test]
    async fn test_logged_status_matches_response() {
        let (response, events) = run_logged(logged_app(), get_request("/teapot")).await;

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(request_events(&events)[0]["status"], "418");
    }

    #[tokio::test]
    async fn test_recorded_error_is_logged() {
        let (response, events) = run_logged(logged_app(), get_request("/failing")).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let logged = request_events(&events);
        assert_eq!(logged[0]["status"], "502");
        assert_eq!(logged[0]["error"], "Error #01: upstream refused");
    }

    #[tokio::test]
    async fn test_forwarded_client_ip_is_logged() {
        let request = axum::http::Request::builder()
            .uri("/ok")
            .header(HTTP_HEADER_X_FORWARDED_FOR, "198.51.100.4")
            .body(Body::empty())
            .unwrap();

        let (_, events) = run_logged(logged_app(), request).await;

        assert_eq!(request_events(&events)[0]["client_ip"], "198.51.100.4");
    }

    #[tokio::test]
    async fn test_nested_loggers_emit_independent_events() {
        let app = logged_app().layer(from_fn(request_logger));

        let (response, events) = run_logged(app, get_request("/ok?a=1")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let logged = request_events(&events);
        assert_eq!(logged.len(), 2);
        for event in &logged {
            assert_eq!(event["status"], "200");
            assert_eq!(event["path"], "/ok?a=1");
            assert_eq!(event["method"], "GET");
        }

        // Inner logger finishes first; the outer one measured a superset of its time.
        let inner: f64 = logged[0]["took"].parse().unwrap();
        let outer: f64 = logged[1]["took"].parse().unwrap();
        assert!(inner >= 0.0);
        assert!(outer >= inner);
    }
}
