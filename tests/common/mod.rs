#![allow(dead_code)]

use axum::{Router, middleware::from_fn_with_state, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use fitness_tracker::api::handlers::health_handler;
use fitness_tracker::api::middleware::auth;
use fitness_tracker::api::routes::{protected_routes, public_routes};
use fitness_tracker::infrastructure::memory::InMemoryStore;
use fitness_tracker::state::AppState;
use std::sync::Arc;

pub const SIGNING_SECRET: &str = "test-signing-secret";

pub fn create_test_state() -> AppState {
    AppState::in_memory(Arc::new(InMemoryStore::new()), SIGNING_SECRET.to_string())
}

/// Issues a token for `user_uid` and returns the raw value.
pub async fn issue_token(state: &AppState, user_uid: &str) -> String {
    let raw = format!("token-for-{user_uid}");
    state
        .auth_service
        .issue_token(&format!("{user_uid}-test"), user_uid, &raw)
        .await
        .unwrap();
    raw
}

/// Full API router without rate limiting, which needs a peer address.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest(
            "/api",
            public_routes().merge(
                protected_routes().route_layer(from_fn_with_state(state.clone(), auth::layer)),
            ),
        )
        .with_state(state)
}

pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Creates a running session over the API and returns its JSON body.
pub async fn create_run(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/api/running/sessions")
        .add_header("Authorization", bearer(token))
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Creates a strength exercise over the API and returns its id.
pub async fn create_exercise(server: &TestServer, token: &str, name: &str) -> i64 {
    let response = server
        .post("/api/exercises")
        .add_header("Authorization", bearer(token))
        .json(&json!({ "name": name, "category": "strength" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}
