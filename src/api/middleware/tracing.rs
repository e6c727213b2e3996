//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

/// Creates a tracing middleware for HTTP requests of one service.
///
/// **On Request:** opens an `INFO` span carrying the service name, HTTP
/// method, URI and version.
///
/// **On Response:** logs status and latency in milliseconds at `INFO`.
///
/// ```text
/// INFO request{service="gateway" method=POST uri=/shorten version=HTTP/1.1}: finished processing request latency=12 ms status=200
/// ```
pub fn layer(
    service: &'static str,
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, impl Fn(&Request<Body>) -> Span + Clone>
{
    TraceLayer::new_for_http()
        .make_span_with(move |request: &Request<Body>| {
            tracing::span!(
                Level::INFO,
                "request",
                service,
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
