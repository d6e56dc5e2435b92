mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_distance_from_duration_and_pace() {
    let server = common::make_server(common::create_test_state());

    let response = server
        .post("/api/pace/distance")
        .json(&json!({ "duration": 30, "pace": "5:00" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["distance"], json!(6.0));
}

#[tokio::test]
async fn test_pace_from_distance_and_duration() {
    let server = common::make_server(common::create_test_state());

    let response = server
        .post("/api/pace/pace")
        .json(&json!({ "distance": 10, "duration": 50 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["pace"], "5:00");
}

#[tokio::test]
async fn test_time_from_distance_and_pace() {
    let server = common::make_server(common::create_test_state());

    let response = server
        .post("/api/pace/time")
        .json(&json!({ "distance": 10, "pace": "4:30" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["duration"], json!(45.0));
}

#[tokio::test]
async fn test_unusable_inputs_yield_null() {
    let server = common::make_server(common::create_test_state());

    let response = server
        .post("/api/pace/distance")
        .json(&json!({ "duration": 30, "pace": "fast" }))
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["distance"].is_null());

    let response = server
        .post("/api/pace/pace")
        .json(&json!({ "distance": 0, "duration": 50 }))
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["pace"].is_null());

    // Missing fields behave like unusable ones.
    let response = server.post("/api/pace/time").json(&json!({})).await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["duration"].is_null());
}

#[tokio::test]
async fn test_aggregate_segments() {
    let server = common::make_server(common::create_test_state());

    let response = server
        .post("/api/pace/aggregate")
        .json(&json!({
            "segments": [
                { "duration": 10, "pace": "5:00" },
                { "duration": 20, "distance": 4 }
            ]
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["total_distance"], json!(6.0));
    assert_eq!(json["total_time"], json!(30.0));
    assert_eq!(json["average_pace"], "5:00");
}

#[tokio::test]
async fn test_aggregate_empty() {
    let server = common::make_server(common::create_test_state());

    let response = server
        .post("/api/pace/aggregate")
        .json(&json!({ "segments": [] }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["total_distance"], json!(0.0));
    assert_eq!(json["total_time"], json!(0.0));
    assert!(json["average_pace"].is_null());
}

#[tokio::test]
async fn test_pace_routes_need_no_token() {
    let server = common::make_server(common::create_test_state());

    server
        .post("/api/pace/pace")
        .json(&json!({ "distance": 5, "duration": 25 }))
        .await
        .assert_status_ok();
}
