//! Health and request-id tests against the in-process storefront router.

use axum::http::StatusCode;

use orchard_integration_tests::TestApp;

#[tokio::test]
async fn test_liveness() {
    let resp = TestApp::new().get("/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_readiness_with_reachable_storage() {
    let resp = TestApp::new().get("/health/ready").await;

    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_every_response_carries_request_id() {
    let resp = TestApp::new().get("/health").await;

    assert!(resp.headers.contains_key("x-request-id"));
}
