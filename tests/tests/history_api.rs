//! Tests for the /api/history endpoint.

use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use integration_tests::setup::TestContext;

fn t0() -> chrono::DateTime<chrono::Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

/// Seeds `n` closed sessions one hour apart.
fn seed_sessions(ctx: &TestContext, n: i64) {
    for i in 0..n {
        ctx.run_session(t0() + Duration::hours(i), 90, &["RDP"]);
    }
}

/// No pagination parameters at all: the legacy bare-array shape.
#[tokio::test]
async fn test_no_params_returns_bare_array() {
    let ctx = TestContext::new();
    seed_sessions(&ctx, 3);

    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let response = server.get("/api/history").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let records = body.as_array().expect("bare array expected");
    assert_eq!(records.len(), 3);

    // Most recent first.
    let first = records[0]["start_time"].as_str().unwrap();
    let last = records[2]["start_time"].as_str().unwrap();
    assert!(first > last);
}

/// Any pagination parameter opts into the envelope shape.
#[tokio::test]
async fn test_paginated_envelope() {
    let ctx = TestContext::new();
    seed_sessions(&ctx, 25);

    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .get("/api/history")
        .add_query_param("page", 1)
        .add_query_param("pageSize", 10)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 25);
    assert_eq!(body["records"].as_array().unwrap().len(), 10);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 10);

    let response = server
        .get("/api/history")
        .add_query_param("page", 3)
        .add_query_param("pageSize", 10)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["records"].as_array().unwrap().len(), 5);
}

/// A lone `page` parameter still paginates, with the default page size.
#[tokio::test]
async fn test_page_without_size_uses_default() {
    let ctx = TestContext::new();
    seed_sessions(&ctx, 25);

    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let response = server.get("/api/history").add_query_param("page", 1).await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["records"].as_array().unwrap().len(), 20);
    assert_eq!(body["pageSize"], 20);
}

/// Out-of-range page numbers are a caller error, not an empty success.
#[tokio::test]
async fn test_invalid_page_rejected() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/api/history").add_query_param("page", 0).await;
    response.assert_status_bad_request();

    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
    assert_eq!(body.as_object().unwrap().len(), 1);
}

/// Non-numeric pagination values get the standard error body, not a
/// framework rejection.
#[tokio::test]
async fn test_non_numeric_page_rejected_with_json_error() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .get("/api/history")
        .add_query_param("page", "abc")
        .await;
    response.assert_status_bad_request();

    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
    assert_eq!(body.as_object().unwrap().len(), 1);

    let response = server
        .get("/api/history")
        .add_query_param("pageSize", "ten")
        .await;
    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}

/// Oversized page sizes are clamped, not rejected.
#[tokio::test]
async fn test_page_size_clamped() {
    let ctx = TestContext::new();
    seed_sessions(&ctx, 5);

    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let response = server
        .get("/api/history")
        .add_query_param("page", 1)
        .add_query_param("pageSize", 10_000)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["pageSize"], 100);
}

/// Record shape: duration is exactly end minus start, whole seconds.
#[tokio::test]
async fn test_record_duration_matches_bounds() {
    let ctx = TestContext::new();
    ctx.run_session(t0(), 60, &["RDP"]);

    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let body: serde_json::Value = server.get("/api/history").await.json();

    let record = &body[0];
    let start: chrono::DateTime<chrono::Utc> =
        record["start_time"].as_str().unwrap().parse().unwrap();
    let end: chrono::DateTime<chrono::Utc> = record["end_time"].as_str().unwrap().parse().unwrap();
    assert_eq!(
        (end - start).num_seconds(),
        record["duration"].as_i64().unwrap()
    );
}
