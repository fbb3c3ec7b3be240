//! Integration tests for the session gate mounted on a real router.

mod helpers;

use std::time::Duration;

use http::StatusCode;

use helpers::{TestApp, Verdict, session_token};
use shieldgate_axum::SESSION_REVOKED_MESSAGE;
use shieldgate_cache::keys;
use shieldgate_core::traits::cache::CacheProvider;

#[tokio::test]
async fn test_public_routes_never_rejected() {
    let app = TestApp::new();
    app.validator.set("revoked", Verdict::Revoked);
    let token = session_token("revoked");

    for (method, path) in [
        ("POST", "/api/auth/login"),
        ("POST", "/api/auth/register"),
        ("POST", "/api/auth/forgot-password"),
        ("POST", "/api/auth/reset-password"),
        ("POST", "/api/auth/confirm-email"),
        ("POST", "/api/auth/resend-confirmation"),
        ("GET", "/docs"),
        ("GET", "/api/health"),
    ] {
        let response = app.request(method, path, Some(&token)).await;
        assert_ne!(
            response.status,
            StatusCode::UNAUTHORIZED,
            "{method} {path} must bypass the gate"
        );
    }

    assert_eq!(app.validator.calls(), 0);
}

#[tokio::test]
async fn test_request_without_credential_passes_through() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/expenses", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.validator.calls(), 0);
}

#[tokio::test]
async fn test_malformed_token_passes_through() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/expenses", Some("definitely-not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.validator.calls(), 0);
}

#[tokio::test]
async fn test_token_without_session_claim_passes_through() {
    let app = TestApp::new();
    let token = helpers::make_token(&serde_json::json!({"sub": "test-user"}));

    let response = app.request("GET", "/api/expenses", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.validator.calls(), 0);
}

#[tokio::test]
async fn test_valid_session_is_checked_once_then_cached() {
    let app = TestApp::new();
    let token = session_token("s1");

    let first = app.request("GET", "/api/expenses", Some(&token)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(app.validator.calls(), 1);
    assert!(
        app.cache
            .exists(&keys::session_validity("s1"))
            .await
            .unwrap()
    );

    // Second request within the TTL: served from cache, Shield untouched.
    let second = app.request("GET", "/api/expenses", Some(&token)).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(app.validator.calls(), 1);
}

#[tokio::test]
async fn test_revoked_session_is_rejected_with_machine_readable_body() {
    let app = TestApp::new();
    app.validator.set("s2", Verdict::Revoked);
    let token = session_token("s2");

    let response = app.request("GET", "/api/expenses", Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body.get("error").unwrap().as_str().unwrap(),
        SESSION_REVOKED_MESSAGE
    );
    assert!(
        !app.cache
            .exists(&keys::session_validity("s2"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_invalid_verdicts_are_not_cached() {
    let app = TestApp::new();
    app.validator.set("s2", Verdict::Revoked);
    let token = session_token("s2");

    app.request("GET", "/api/expenses", Some(&token)).await;
    app.request("GET", "/api/expenses", Some(&token)).await;

    // No negative caching: each rejected request re-checks Shield.
    assert_eq!(app.validator.calls(), 2);
}

#[tokio::test]
async fn test_relogin_after_revocation_is_checked_fresh() {
    let app = TestApp::new();
    app.validator.set("s2", Verdict::Revoked);

    let old = session_token("s2");
    let response = app.request("GET", "/api/expenses", Some(&old)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // A new login issues a fresh session id; nothing stale blocks it.
    let new = session_token("s2-next");
    let response = app.request("GET", "/api/expenses", Some(&new)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_cache_entry_expires_after_ttl() {
    let app = TestApp::with_ttl(1);
    let token = session_token("s1");

    app.request("GET", "/api/expenses", Some(&token)).await;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    app.request("GET", "/api/expenses", Some(&token)).await;

    assert_eq!(app.validator.calls(), 2);
}

#[tokio::test]
async fn test_shield_outage_fails_open() {
    let app = TestApp::new();
    app.validator.set("s3", Verdict::Error);
    let token = session_token("s3");

    let response = app.request("GET", "/api/expenses", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.validator.calls(), 1);
    assert!(
        !app.cache
            .exists(&keys::session_validity("s3"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_repeated_requests_are_idempotent() {
    let app = TestApp::new();
    let token = session_token("s1");

    for _ in 0..5 {
        let response = app.request("GET", "/api/expenses", Some(&token)).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    assert_eq!(app.validator.calls(), 1);
}
