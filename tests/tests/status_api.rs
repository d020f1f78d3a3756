//! Tests for the /api/status endpoint.

use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use integration_tests::setup::TestContext;

fn t0() -> chrono::DateTime<chrono::Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// A fresh daemon reports no active session.
#[tokio::test]
async fn test_boot_state_is_idle() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/api/status").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["remote_active"], false);
    assert_eq!(body["signals"], serde_json::json!([]));
    assert!(body.get("start_time").is_none());
    assert!(body.get("duration").is_none());
}

/// An open session is visible with its start time and contributing signals.
#[tokio::test]
async fn test_active_session_reported() {
    let ctx = TestContext::new();
    ctx.observe(t0(), &["TeamViewer"]);
    ctx.observe(t0() + Duration::seconds(5), &["TeamViewer", "RDP"]);

    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let response = server.get("/api/status").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["remote_active"], true);
    assert!(body["start_time"].is_string());
    assert!(body["duration"].is_i64() || body["duration"].is_u64());

    let names: Vec<&str> = body["signals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["TeamViewer", "RDP"]);
}

/// A session inside its debounce window still reads as active.
#[tokio::test]
async fn test_debouncing_session_still_active() {
    let ctx = TestContext::with_debounce_secs(10);
    ctx.observe(t0(), &["AnyDesk"]);
    ctx.observe(t0() + Duration::seconds(5), &[]);

    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let response = server.get("/api/status").await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["remote_active"], true);
}

/// Signals landing only after the window expired belong to a new session;
/// the old one is closed and persisted.
#[tokio::test]
async fn test_gap_past_window_splits_sessions() {
    let ctx = TestContext::with_debounce_secs(10);
    ctx.observe(t0(), &["AnyDesk"]);
    ctx.observe(t0() + Duration::seconds(5), &[]);
    // Next tick is late and already carries signals again.
    ctx.observe(t0() + Duration::seconds(120), &["AnyDesk"]);

    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let status: serde_json::Value = server.get("/api/status").await.json();
    assert_eq!(status["remote_active"], true);
    let start: chrono::DateTime<chrono::Utc> =
        status["start_time"].as_str().unwrap().parse().unwrap();
    assert_eq!(start, t0() + Duration::seconds(120));

    let history: serde_json::Value = server.get("/api/history").await.json();
    let records = history.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["duration"], 15);
}

/// A closed session leaves status idle while history keeps the record.
#[tokio::test]
async fn test_idle_after_session_ends_history_kept() {
    let ctx = TestContext::new();
    ctx.run_session(t0(), 60, &["RustDesk"]);

    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let status: serde_json::Value = server.get("/api/status").await.json();
    assert_eq!(status["remote_active"], false);

    let history: serde_json::Value = server.get("/api/history").await.json();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["signals"][0], "RustDesk");
}
