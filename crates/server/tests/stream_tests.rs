//! SSE endpoint tests.
//!
//! The fixture shrinks the snapshot bound to 3 so the streams terminate and
//! the whole body can be collected; the paused clock makes the interval
//! sleeps instant.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use concierge_core::config::StreamConfig;

use common::{TestFixture, KEY};

#[tokio::test(start_paused = true)]
async fn test_deployment_stream_for_absent_record() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/deployment/ghost").await;
    assert_eq!(response.status, StatusCode::OK);

    let events = response.sse_events();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e["status"] == "initializing"));
}

#[tokio::test(start_paused = true)]
async fn test_deployment_stream_reports_current_status() {
    let fixture = TestFixture::new().await;
    fixture
        .post(
            "/deploy",
            json!({"name": "acme", "motto": "we try harder", "key": KEY}),
        )
        .await;
    fixture
        .post(
            "/status",
            json!({"name": "acme", "status": "live", "key": KEY}),
        )
        .await;

    let response = fixture.get("/deployment/acme").await;
    assert_eq!(response.status, StatusCode::OK);

    let events = response.sse_events();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e["status"] == "live"));
}

#[tokio::test(start_paused = true)]
async fn test_deployment_stream_bound_is_configurable() {
    let fixture = TestFixture::with_stream_config(StreamConfig {
        interval_secs: 1,
        max_snapshots: 5,
    })
    .await;

    let response = fixture.get("/deployment/ghost").await;
    assert_eq!(response.sse_events().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_waypoints_stream_truncates_to_limit() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/get-waypoints").await;
    assert_eq!(response.status, StatusCode::OK);

    // The fixture file has 12 waypoints; the configured limit is 10
    let events = response.sse_events();
    assert_eq!(events.len(), 10);
    assert_eq!(events[0]["lat"], 40);
    assert_eq!(events[9]["lat"], 49);
}

#[tokio::test(start_paused = true)]
async fn test_waypoints_missing_file_is_500() {
    let fixture = TestFixture::new().await;
    std::fs::remove_file(fixture.temp_dir.path().join("waypoints.json")).unwrap();

    let response = fixture.get("/get-waypoints").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}
