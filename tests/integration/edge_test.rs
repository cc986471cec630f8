//! Integration tests for the edge redirect filter.

mod helpers;

use axum::http::StatusCode;

use helpers::{EXPIRED_TOKEN, SALES_TOKEN, TestApp};

#[tokio::test]
async fn test_protected_page_without_cookie_redirects_to_login() {
    let app = TestApp::new().await;

    for path in ["/dashboard", "/users", "/users/7", "/customers", "/return-receipts"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(response.location(), Some("/login"), "{path}");
    }

    // The filter never consults the API.
    assert_eq!(app.calls.me_calls(), 0);
}

#[tokio::test]
async fn test_login_with_cookie_redirects_to_dashboard() {
    let app = TestApp::new().await;

    let response = app.get("/login", Some(SALES_TOKEN)).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/dashboard"));

    // Presence is enough; the token is not validated here.
    let response = app.get("/login", Some(EXPIRED_TOKEN)).await;
    assert_eq!(response.location(), Some("/dashboard"));
    assert_eq!(app.calls.me_calls(), 0);
}

#[tokio::test]
async fn test_login_form_post_with_cookie_is_redirected_as_get() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/login", Some(SALES_TOKEN), "username=sam&password=cylinder")
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/dashboard"));
    assert_eq!(app.calls.login_calls(), 0);

    let landing = app.get("/dashboard", Some(SALES_TOKEN)).await;
    assert_eq!(landing.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_without_cookie_renders_form() {
    let app = TestApp::new().await;

    let response = app.get("/login", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"<form method="post" action="/login">"#));
}

#[tokio::test]
async fn test_unprotected_paths_pass_through() {
    let app = TestApp::new().await;

    let response = app.get("/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");

    // Segment-aware: not under `/users`.
    let response = app.get("/usersettings", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.location().is_none());
}

#[tokio::test]
async fn test_cookie_on_protected_page_reaches_handler() {
    let app = TestApp::new().await;

    let response = app.get("/dashboard", Some(SALES_TOKEN)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.calls.me_calls(), 1);
}

#[tokio::test]
async fn test_root_goes_to_landing() {
    let app = TestApp::new().await;

    let response = app.get("/", None).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/dashboard"));
}
