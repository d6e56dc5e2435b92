//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`       - Health check: storage backend (public)
//! - `POST /api/pace/*`   - Pace calculator (public)
//! - `/api/*`             - Sessions and exercise catalog (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer token resolved to the calling user
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer());

    let public = api::routes::public_routes().layer(rate_limit::layer());

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", Router::new().merge(public).merge(protected))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryStore;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> NormalizePath<Router> {
        app_router(AppState::in_memory(
            Arc::new(InMemoryStore::new()),
            "test-signing-secret".to_string(),
        ))
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
        req
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let response = app().oneshot(request("GET", "/health/", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_calculator_is_reachable() {
        let response = app()
            .oneshot(request(
                "POST",
                "/api/pace/pace",
                r#"{"distance": 10, "duration": 50}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let response = app()
            .oneshot(request("GET", "/api/running/sessions", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_routes_are_rate_limited() {
        let app = app();
        let mut statuses = Vec::new();

        for _ in 0..25 {
            let response = app
                .clone()
                .oneshot(request("GET", "/api/exercises", ""))
                .await
                .unwrap();
            statuses.push(response.status());
        }

        assert!(statuses[..20].iter().all(|s| *s == StatusCode::UNAUTHORIZED));
        assert!(statuses.contains(&StatusCode::TOO_MANY_REQUESTS));
    }
}
