mod common;

use common::TestApp;
use packet_service::services::providers::mock::MockTextProvider;
use reqwest::Client;
use reqwest::StatusCode;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "packet-service");
}

#[tokio::test]
async fn readiness_follows_provider_health() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let degraded = TestApp::spawn_with_mock(MockTextProvider::new(false)).await;
    let response = client
        .get(format!("{}/ready", degraded.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.headers().contains_key("x-request-id"));

    let response = client
        .get(format!("{}/health", app.address))
        .header("x-request-id", "test-req-42")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("test-req-42")
    );
}
