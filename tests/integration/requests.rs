//! Item requests over HTTP

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_request_flow() {
    let app = TestApp::new();
    let requester = app.create_user("Requester").await;
    let owner = app.create_user("Owner").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/requests",
            Some(requester),
            Some(json!({ "description": "Need a projector" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let request = body["id"].as_i64().unwrap();

    let (status, _) = app
        .call(
            Method::POST,
            "/items",
            Some(owner),
            Some(json!({
                "name": "Projector",
                "description": "Full HD projector",
                "available": true,
                "requestId": request
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.call(Method::GET, "/requests", Some(requester), None).await;
    let own = body.as_array().unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0]["items"][0]["name"], "Projector");

    let (_, body) = app
        .call(Method::GET, "/requests/all?from=0&size=5", Some(owner), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = app
        .call(Method::GET, "/requests/all", Some(requester), None)
        .await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = app
        .call(
            Method::PATCH,
            &format!("/requests/{}", request),
            Some(owner),
            Some(json!({ "description": "Mine now" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::GET, &format!("/requests/{}", request), Some(owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Need a projector");
}

#[tokio::test]
async fn test_blank_description_is_rejected() {
    let app = TestApp::new();
    let requester = app.create_user("Requester").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/requests",
            Some(requester),
            Some(json!({ "description": "   " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "Validation");
}
