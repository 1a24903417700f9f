//! Session-refresh interceptor tests.
//!
//! A wiremock server plays the admin backend; recorders stand in for the
//! toast and the router.

mod common;

use std::time::Duration;

use futures_util::future::join_all;
use serde_json::{Value, json};
use sowat_core::error::AuthError;
use sowat_core::model::{Page, User};
use sowat_core::{Error, KeyValueStore};
use sowat_http::ApiRequest;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{Harness, auth_headers, user_page};

async fn mount_users_rejecting(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "message": "Unauthorized"
        })))
        .mount(server)
        .await;
}

async fn mount_users_accepting(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_page()))
        .mount(server)
        .await;
}

// ============================================================================
// Token attachment
// ============================================================================

#[tokio::test]
async fn test_attaches_stored_access_token() {
    let server = MockServer::start().await;
    mount_users_accepting(&server, "tok-1").await;

    let harness = Harness::new(&server).with_tokens("tok-1", Some("ref-1"));
    let page: Page<User> = harness.client.get("/admin/users").await.unwrap();

    assert_eq!(page.meta.total, 1);
    assert_eq!(
        auth_headers(&server, "/admin/users").await,
        vec![Some("Bearer tok-1".to_string())]
    );
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/dashboard/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let harness = Harness::new(&server);
    let alerts: Vec<Value> = harness.client.get("/admin/dashboard/alerts").await.unwrap();

    assert!(alerts.is_empty());
    assert_eq!(auth_headers(&server, "/admin/dashboard/alerts").await, vec![None]);
}

// ============================================================================
// Refresh and replay
// ============================================================================

#[tokio::test]
async fn test_refresh_then_replay_on_401() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;
    mount_users_accepting(&server, "fresh-123").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refresh_token": "valid-xyz"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh-123"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", Some("valid-xyz"));
    let page: Page<User> = harness.client.get("/admin/users").await.unwrap();

    assert_eq!(page.data[0].email, "admin@sowat.io");
    assert_eq!(harness.access_token().as_deref(), Some("fresh-123"));
    // Not rotated, so the old refresh token is kept.
    assert_eq!(harness.refresh_token().as_deref(), Some("valid-xyz"));
    assert_eq!(
        auth_headers(&server, "/admin/users").await,
        vec![
            Some("Bearer expired-abc".to_string()),
            Some("Bearer fresh-123".to_string())
        ]
    );
    assert!(harness.notifier.messages().is_empty());
    assert!(harness.navigator.routes().is_empty());
}

#[tokio::test]
async fn test_refresh_stores_rotated_refresh_token() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;
    mount_users_accepting(&server, "fresh-123").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-123",
            "refresh_token": "rotated-456"
        })))
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", Some("valid-xyz"));
    let _: Page<User> = harness.client.get("/admin/users").await.unwrap();

    assert_eq!(harness.refresh_token().as_deref(), Some("rotated-456"));
}

#[tokio::test]
async fn test_refresh_call_carries_no_bearer() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;
    mount_users_accepting(&server, "fresh-123").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh-123"})),
        )
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", Some("valid-xyz"));
    let _: Page<User> = harness.client.get("/admin/users").await.unwrap();

    assert_eq!(auth_headers(&server, "/auth/refresh").await, vec![None]);
}

#[tokio::test]
async fn test_replayed_401_is_surfaced_without_second_refresh() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;
    mount_users_rejecting(&server, "fresh-123").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh-123"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", Some("valid-xyz"));
    let err = harness
        .client
        .get::<Page<User>>("/admin/users")
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!err.is_session_terminated());
    assert_eq!(auth_headers(&server, "/admin/users").await.len(), 2);
    assert_eq!(harness.notifier.messages(), vec!["Unauthorized".to_string()]);
}

#[tokio::test]
async fn test_opt_out_of_recovery_surfaces_401() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", Some("valid-xyz"));
    let request = ApiRequest::get("/admin/users").without_auth_recovery();
    let err = harness.client.send::<Value>(&request).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(harness.access_token().as_deref(), Some("expired-abc"));
}

// ============================================================================
// Session termination
// ============================================================================

#[tokio::test]
async fn test_missing_refresh_token_terminates_session() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", None);
    let err = harness
        .client
        .get::<Page<User>>("/admin/users")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::MissingRefreshToken)));
    assert!(err.is_session_terminated());
    assert_eq!(harness.access_token(), None);
    assert_eq!(harness.refresh_token(), None);
    assert_eq!(harness.navigator.routes(), vec!["/login".to_string()]);
    assert_eq!(harness.notifier.messages(), vec!["Unauthorized".to_string()]);
}

#[tokio::test]
async fn test_failed_refresh_terminates_session() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "message": "Invalid refresh token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", Some("revoked-xyz"));
    let err = harness
        .client
        .get::<Page<User>>("/admin/users")
        .await
        .unwrap_err();

    match &err {
        Error::Auth(AuthError::RefreshFailed(cause)) => assert!(cause.is_unauthorized()),
        other => panic!("expected RefreshFailed, got {:?}", other),
    }
    assert!(harness.store.get("access_token").unwrap().is_none());
    assert!(harness.store.get("refresh_token").unwrap().is_none());
    assert_eq!(harness.navigator.routes(), vec!["/login".to_string()]);
    // The original request is never replayed.
    assert_eq!(auth_headers(&server, "/admin/users").await.len(), 1);
}

#[tokio::test]
async fn test_malformed_refresh_response_terminates_session() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "nope"})))
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", Some("valid-xyz"));
    let err = harness
        .client
        .get::<Page<User>>("/admin/users")
        .await
        .unwrap_err();

    assert!(err.is_session_terminated());
    assert_eq!(harness.access_token(), None);
    assert_eq!(harness.navigator.routes().len(), 1);
}

// ============================================================================
// Coalescing
// ============================================================================

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;
    mount_users_accepting(&server, "fresh-123").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "fresh-123", "refresh_token": "next-1"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", Some("valid-xyz"));
    let client = &harness.client;

    let results = join_all((0..5).map(|_| client.get::<Page<User>>("/admin/users"))).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(harness.access_token().as_deref(), Some("fresh-123"));
    assert_eq!(harness.refresh_token().as_deref(), Some("next-1"));
    assert!(harness.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_concurrent_waiters_observe_termination() {
    let server = MockServer::start().await;
    mount_users_rejecting(&server, "expired-abc").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"message": "Invalid refresh token"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("expired-abc", Some("valid-xyz"));
    let client = &harness.client;

    let (a, b) = tokio::join!(
        client.get::<Page<User>>("/admin/users"),
        client.get::<Page<User>>("/admin/users"),
    );

    let errors = [a.unwrap_err(), b.unwrap_err()];
    assert!(errors.iter().all(Error::is_session_terminated));
    assert_eq!(
        errors
            .iter()
            .filter(|e| matches!(e, Error::Auth(AuthError::RefreshFailed(_))))
            .count(),
        1
    );
    assert_eq!(harness.access_token(), None);
}

// ============================================================================
// Notifications
// ============================================================================

#[tokio::test]
async fn test_server_error_notifies_once_with_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/admin/users/u-42/quotas"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "statusCode": 400,
            "message": ["extraArticles must not be less than 0"],
            "error": "Bad Request"
        })))
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("tok-1", Some("ref-1"));
    let err = harness
        .client
        .patch::<_, Value>("/admin/users/u-42/quotas", &json!({"extraArticles": -1}))
        .await
        .unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status, 400);
            assert_eq!(api.error.as_deref(), Some("Bad Request"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert_eq!(
        harness.notifier.messages(),
        vec!["extraArticles must not be less than 0".to_string()]
    );
}

#[tokio::test]
async fn test_error_without_message_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/plans"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let harness = Harness::new(&server);
    let _ = harness.client.get::<Value>("/admin/plans").await.unwrap_err();

    let messages = harness.notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("503"));
}

#[tokio::test]
async fn test_quiet_request_raises_no_notification() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/plans"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let harness = Harness::new(&server);
    let request = ApiRequest::get("/admin/plans").quiet();
    assert!(harness.client.send::<Value>(&request).await.is_err());
    assert!(harness.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_transport_failure_is_notified_without_refresh() {
    // Reserve a free port, then release it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{}", port);

    let config = sowat_http::ClientConfig::new(sowat_core::ApiUrl::new(&uri).unwrap());
    let notifier = std::sync::Arc::new(common::RecordingNotifier::default());
    let client = sowat_http::ApiClient::builder(config)
        .notifier(notifier.clone())
        .build()
        .unwrap();

    let err = client.get::<Value>("/admin/users").await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_empty_success_body_decodes_as_unit() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/admin/plans/p-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let harness = Harness::new(&server).with_tokens("tok-1", Some("ref-1"));
    harness.client.delete::<()>("/admin/plans/p-1").await.unwrap();
}
