//! Integration tests for permission-guarded pages.

mod helpers;

use axum::http::StatusCode;

use helpers::{ADMIN_TOKEN, BARE_TOKEN, SALES_TOKEN, TestApp};

#[tokio::test]
async fn test_granted_permission_renders_page() {
    let app = TestApp::new().await;

    let response = app.get("/customers", Some(SALES_TOKEN)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"data-section="Customers""#));
    assert!(!response.body.contains("Access denied"));
    assert!(response.body.contains("Sam"));
}

#[tokio::test]
async fn test_missing_permission_renders_denial_and_keeps_session() {
    let app = TestApp::new().await;

    let response = app.get("/suppliers", Some(SALES_TOKEN)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.body.contains("Access denied"));
    assert!(!response.body.contains(r#"data-section="Suppliers""#));
    assert!(response.session_cookie().is_none());
    assert!(response.location().is_none());
}

#[tokio::test]
async fn test_manage_grants_view() {
    let app = TestApp::new().await;

    let response = app.get("/orders", Some(SALES_TOKEN)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_navigation_lists_only_permitted_pages() {
    let app = TestApp::new().await;

    let response = app.get("/dashboard", Some(SALES_TOKEN)).await;

    assert!(response.body.contains(r#"<a href="/customers">"#));
    assert!(response.body.contains(r#"<a href="/orders">"#));
    assert!(!response.body.contains(r#"<a href="/suppliers">"#));
    assert!(!response.body.contains(r#"<a href="/users">"#));
}

#[tokio::test]
async fn test_super_admin_with_empty_list_sees_everything() {
    let app = TestApp::new().await;

    for path in ["/customers", "/suppliers", "/warehouse", "/users"] {
        let response = app.get(path, Some(ADMIN_TOKEN)).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_role_without_permission_list_is_denied_gated_pages() {
    let app = TestApp::new().await;

    let response = app.get("/deliveries", Some(BARE_TOKEN)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.get("/dashboard", Some(BARE_TOKEN)).await;
    assert_eq!(response.status, StatusCode::OK);
}
