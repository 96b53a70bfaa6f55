//! HTTP user directory tests against a mock user service.

use orderly_client::HttpUserDirectory;
use orderly_config::DirectoryConfig;
use orderly_core::{CallContext, OrderlyError, UserId};
use orderly_service::UserDirectory;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn directory(server: &MockServer) -> HttpUserDirectory {
    HttpUserDirectory::new(&DirectoryConfig {
        base_url: server.uri(),
        timeout_secs: 2,
        pool_max_idle_per_host: 1,
    })
    .unwrap()
}

#[tokio::test]
async fn test_resolves_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 1,
                "email": "a@x.com",
                "created_at": "2024-06-01T12:00:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let subject = directory(&server)
        .get_user(&CallContext::background(), UserId::new(1))
        .await
        .unwrap();

    assert_eq!(subject.id, UserId::new(1));
    assert_eq!(subject.email, "a@x.com");
    assert!(subject.created_at.is_some());
}

#[tokio::test]
async fn test_returns_canonical_id_from_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": "70", "email": "b@x.com" }
        })))
        .mount(&server)
        .await;

    let subject = directory(&server)
        .get_user(&CallContext::background(), UserId::new(7))
        .await
        .unwrap();

    assert_eq!(subject.id, UserId::new(70));
}

#[tokio::test]
async fn test_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": { "code": "NOT_FOUND", "message": "User with id 999 not found" }
        })))
        .mount(&server)
        .await;

    let err = directory(&server)
        .get_user(&CallContext::background(), UserId::new(999))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = directory(&server)
        .get_user(&CallContext::background(), UserId::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderlyError::ExternalService { .. }));
}

#[tokio::test]
async fn test_malformed_body_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = directory(&server)
        .get_user(&CallContext::background(), UserId::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderlyError::ExternalService { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let directory = HttpUserDirectory::new(&DirectoryConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        pool_max_idle_per_host: 1,
    })
    .unwrap();

    let err = directory
        .get_user(&CallContext::background(), UserId::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderlyError::ExternalService { .. }));
}

#[tokio::test]
async fn test_deadline_cancels_slow_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": { "id": 1, "email": "a@x.com" } }))
                .set_delay(Duration::from_secs(1)),
        )
        .mount(&server)
        .await;

    let ctx = CallContext::with_timeout(Duration::from_millis(50));
    let err = directory(&server)
        .get_user(&ctx, UserId::new(1))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
}
