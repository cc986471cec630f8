//! Integration tests for the login, logout, and session-expiry flows.

mod helpers;

use axum::http::StatusCode;

use helpers::{EXPIRED_TOKEN, SALES_TOKEN, TestApp};

#[tokio::test]
async fn test_login_sets_cookie_and_lands_on_dashboard() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/login", None, "username=sam&password=cylinder")
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/dashboard"));

    let cookie = response.session_cookie().expect("session cookie set");
    assert!(cookie.starts_with(&format!("session_token={SALES_TOKEN}")));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(!cookie.contains("HttpOnly"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_rejected_login_shows_api_message() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/login", None, "username=sam&password=wrong")
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Invalid username or password"));
    assert!(response.body.contains(r#"value="sam""#));
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_invalid_form_blocks_submission() {
    let app = TestApp::new().await;

    let response = app.post_form("/login", None, "username=&password=").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Enter your username and password."));
    assert_eq!(app.calls.login_calls(), 0);
}

#[tokio::test]
async fn test_expired_session_clears_cookie_and_redirects() {
    let app = TestApp::new().await;

    let response = app.get("/customers", Some(EXPIRED_TOKEN)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/login"));
    let cookie = response.session_cookie().expect("cookie removal sent");
    assert!(cookie.starts_with("session_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_expired_session_reports_unauthenticated() {
    let app = TestApp::new().await;

    let response = app.get("/api/session", Some(EXPIRED_TOKEN)).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "unauthenticated");
    assert!(body["user"].is_null());
    assert!(response.session_cookie().is_some());
}

#[tokio::test]
async fn test_session_snapshot_for_valid_cookie() {
    let app = TestApp::new().await;

    let response = app.get("/api/session", Some(SALES_TOKEN)).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "authenticated");
    assert_eq!(body["user"]["role"]["role_name"], "Sales");
    let permissions: Vec<&str> = body["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p.as_str())
        .collect();
    assert!(permissions.contains(&"customer:view"));
    assert!(permissions.contains(&"order:manage"));
}

#[tokio::test]
async fn test_no_cookie_session_snapshot_is_unauthenticated() {
    let app = TestApp::new().await;

    let response = app.get("/api/session", None).await;

    assert_eq!(response.json()["status"], "unauthenticated");
    assert_eq!(app.calls.me_calls(), 0);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;

    let response = app.post_form("/logout", Some(SALES_TOKEN), "").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
    let cookie = response.session_cookie().expect("cookie removal sent");
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_unreachable_api_keeps_cookie_and_shows_notice() {
    let app = TestApp::offline();

    let response = app.get("/dashboard", Some(SALES_TOKEN)).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.body.contains("could not be reached"));
    assert!(response.session_cookie().is_none());
    assert!(response.location().is_none());
}

#[tokio::test]
async fn test_resolution_is_shared_across_requests() {
    let app = TestApp::new().await;

    for _ in 0..3 {
        let response = app.get("/dashboard", Some(SALES_TOKEN)).await;
        assert_eq!(response.status, StatusCode::OK);
    }
    assert_eq!(app.calls.me_calls(), 1);
}
