//! Tests for notification config and shell-event endpoints.

use axum_test::TestServer;
use integration_tests::fixtures::{desktop_config, malformed_config, webhook_config};
use integration_tests::setup::TestContext;

/// GET before any save returns the built-in default.
#[tokio::test]
async fn test_default_config_before_first_save() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/api/notification").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["enabled"], false);
    assert_eq!(body["channels"], serde_json::json!(["desktop"]));
    assert_eq!(body["min_duration_secs"], 0);
}

/// POST then GET round-trips the saved config.
#[tokio::test]
async fn test_save_and_reload_config() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/notification")
        .json(&webhook_config("https://example.com/hook"))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = server.get("/api/notification").await.json();
    assert_eq!(body["enabled"], true);
    assert_eq!(body["min_duration_secs"], 30);
    assert_eq!(body["webhook"]["url"], "https://example.com/hook");
}

/// A type error anywhere rejects the whole config and keeps the old one.
#[tokio::test]
async fn test_malformed_config_rejected_previous_kept() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server
        .post("/api/notification")
        .json(&desktop_config())
        .await
        .assert_status_ok();

    let response = server
        .post("/api/notification")
        .json(&malformed_config())
        .await;
    response.assert_status_bad_request();

    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());

    // Previously saved config is untouched.
    let saved: serde_json::Value = server.get("/api/notification").await.json();
    assert_eq!(saved["enabled"], true);
    assert_eq!(saved["channels"], serde_json::json!(["desktop"]));
}

/// Unknown channel identifiers fail shape validation.
#[tokio::test]
async fn test_unknown_channel_rejected() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/notification")
        .json(&serde_json::json!({"enabled": true, "channels": ["pager"]}))
        .await;
    response.assert_status_bad_request();
}

/// Webhook channel without webhook settings is invalid.
#[tokio::test]
async fn test_webhook_channel_requires_settings() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/notification")
        .json(&serde_json::json!({"enabled": true, "channels": ["webhook"]}))
        .await;
    response.assert_status_bad_request();
}

/// The test endpoint echoes a sample payload without persisting the config.
#[tokio::test]
async fn test_notification_test_does_not_persist() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/notification/test")
        .json(&desktop_config())
        .await;
    response.assert_status_ok();

    let payload: serde_json::Value = response.json();
    assert!(payload["title"].is_string());
    assert!(payload["body"].is_string());

    // Submitted config was previewed, not saved.
    let saved: serde_json::Value = server.get("/api/notification").await.json();
    assert_eq!(saved["enabled"], false);
}

/// Shell lifecycle events are acknowledged and audited.
#[tokio::test]
async fn test_notify_records_audit_event() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/notify")
        .json(&serde_json::json!({"type": "app_exit"}))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);

    let events = ctx.store.recent_audit_events(10).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "app_exit");
}

/// A missing or empty event type is a caller error.
#[tokio::test]
async fn test_notify_empty_type_rejected() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.post("/api/notify").json(&serde_json::json!({})).await;
    response.assert_status_bad_request();

    assert!(ctx.store.recent_audit_events(10).unwrap().is_empty());
}

/// Health endpoints answer without auth and with the component report shape.
#[tokio::test]
async fn test_health_report_shape() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let status = body["status"].as_str().unwrap_or("");
    assert!(
        status == "healthy" || status == "degraded" || status == "unhealthy",
        "unexpected status '{status}'"
    );
    assert!(body["components"].is_array());
}
