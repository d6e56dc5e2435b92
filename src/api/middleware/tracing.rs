//! Request tracing for the whole router.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

/// Wraps every request in an `INFO` span carrying method, URI and version.
///
/// Request start is logged at `DEBUG`, the response at `INFO` with its status
/// and latency in milliseconds, and 5xx responses additionally at `ERROR`:
///
/// ```text
/// INFO request{method=POST uri=/api/running/sessions version=HTTP/1.1}: finished processing request latency=12 ms status=201
/// ```
///
/// Bearer tokens live in headers, which the span does not record.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
