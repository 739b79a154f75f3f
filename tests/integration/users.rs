//! User registry over HTTP

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_user_crud() {
    let app = TestApp::new();
    let id = app.create_user("Ann").await;

    let (status, body) = app.call(Method::GET, &format!("/users/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ann@example.com");

    let (status, body) = app
        .call(
            Method::PATCH,
            &format!("/users/{}", id),
            None,
            Some(json!({ "name": "Annie" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Annie");
    assert_eq!(body["email"], "ann@example.com");

    let (_, body) = app.call(Method::GET, "/users", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = app.call(Method::DELETE, &format!("/users/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.call(Method::GET, &format!("/users/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.create_user("Ann").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/users",
            None,
            Some(json!({ "name": "Other Ann", "email": "ann@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "Conflict");
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .call(
            Method::POST,
            "/users",
            None,
            Some(json!({ "name": "Ann", "email": "ann-at-example" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "Validation");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
