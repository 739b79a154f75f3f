//! Item catalog and comments over HTTP

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use shareit::models::booking::{BookingStatus, NewBooking};

use crate::common::{tomorrow, TestApp};

#[tokio::test]
async fn test_item_update_rules() {
    let app = TestApp::new();
    let owner = app.create_user("Owner").await;
    let other = app.create_user("Other").await;
    let item = app.create_item(owner, "Tent").await;

    let (status, body) = app
        .call(
            Method::PATCH,
            &format!("/items/{}", item),
            Some(other),
            Some(json!({ "available": false })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "Forbidden");

    let (status, _) = app
        .call(
            Method::PATCH,
            &format!("/items/{}", item),
            Some(owner),
            Some(json!({ "ownerId": other })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .call(
            Method::PATCH,
            &format!("/items/{}", item),
            Some(owner),
            Some(json!({ "description": "Four person tent" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Four person tent");
    assert_eq!(body["available"], true);
}

#[tokio::test]
async fn test_create_item_requires_fields() {
    let app = TestApp::new();
    let owner = app.create_user("Owner").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/items",
            Some(owner),
            Some(json!({ "name": "Tent", "description": "Big" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "Validation");

    let (status, _) = app
        .call(
            Method::POST,
            "/items",
            Some(999),
            Some(json!({ "name": "Tent", "description": "Big", "available": true })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::new();
    let owner = app.create_user("Owner").await;
    app.create_item(owner, "Electric Drill").await;
    app.create_item(owner, "Ladder").await;

    let (status, body) = app
        .call(Method::GET, "/items/search?text=dRiLl", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Electric Drill");

    let (status, body) = app.call(Method::GET, "/items/search?text=", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_owner_view_and_comments() {
    let app = TestApp::new();
    let owner = app.create_user("Owner").await;
    let booker = app.create_user("Booker").await;
    let item = app.create_item(owner, "Kayak").await;

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/items/{}/comment", item),
            Some(booker),
            Some(json!({ "text": "Lovely" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "Validation");

    let start = Utc::now() - Duration::days(2);
    app.repository
        .bookings
        .create(&NewBooking {
            item_id: item,
            booker_id: booker,
            start_date: start,
            end_date: start + Duration::days(1),
            status: BookingStatus::Approved,
        })
        .await
        .unwrap();
    let next = tomorrow();
    let (status, _) = app.book(booker, item, next, next + Duration::days(1)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/items/{}/comment", item),
            Some(booker),
            Some(json!({ "text": "Lovely" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["authorName"], "Booker");

    let (_, body) = app
        .call(Method::GET, &format!("/items/{}", item), Some(owner), None)
        .await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
    assert_eq!(body["lastBooking"]["bookerId"], booker);
    assert!(body["nextBooking"].is_object());

    let (_, body) = app
        .call(Method::GET, &format!("/items/{}", item), Some(booker), None)
        .await;
    assert!(body["lastBooking"].is_null());
    assert!(body["nextBooking"].is_null());

    let (status, body) = app.call(Method::GET, "/items", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_user_header() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/items", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
}
