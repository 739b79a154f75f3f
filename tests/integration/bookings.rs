//! Booking lifecycle over HTTP

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use crate::common::{tomorrow, TestApp};

async fn setup() -> (TestApp, i64, i64, i64) {
    let app = TestApp::new();
    let owner = app.create_user("Owner").await;
    let booker = app.create_user("Booker").await;
    let item = app.create_item(owner, "Drill").await;
    (app, owner, booker, item)
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let (app, owner, booker, item) = setup().await;
    let start = tomorrow();

    let (status, body) = app.book(booker, item, start, start + Duration::days(1)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "WAITING");
    assert_eq!(body["booker"]["id"], booker);
    assert_eq!(body["item"]["name"], "Drill");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = app
        .call(Method::PATCH, &format!("/bookings/{}?approved=true", id), Some(owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "APPROVED");

    let (status, body) = app
        .call(Method::PATCH, &format!("/bookings/{}?approved=true", id), Some(owner), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");

    let (status, _) = app
        .call(Method::GET, &format!("/bookings/{}", id), Some(booker), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_rejected_booking_cannot_be_approved_later() {
    let (app, owner, booker, item) = setup().await;
    let other = app.create_user("Other").await;
    let start = tomorrow();
    let end = start + Duration::days(1);

    let (_, body) = app.book(booker, item, start, end).await;
    let first = body["id"].as_i64().unwrap();
    let (status, _) = app
        .call(Method::PATCH, &format!("/bookings/{}?approved=false", first), Some(owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.book(other, item, start, end).await;
    assert_eq!(status, StatusCode::CREATED);
    let second = body["id"].as_i64().unwrap();
    let (status, _) = app
        .call(Method::PATCH, &format!("/bookings/{}?approved=true", second), Some(owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call(Method::PATCH, &format!("/bookings/{}?approved=true", first), Some(owner), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");

    let (_, body) = app
        .call(Method::GET, &format!("/bookings/{}", first), Some(booker), None)
        .await;
    assert_eq!(body["status"], "REJECTED");
}

#[tokio::test]
async fn test_overlap_reports_not_found() {
    let (app, _, booker, item) = setup().await;
    let other = app.create_user("Other").await;
    let start = tomorrow();

    let (status, _) = app.book(booker, item, start, start + Duration::days(2)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .book(other, item, start + Duration::hours(5), start + Duration::days(3))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "BookingOverlap");
}

#[tokio::test]
async fn test_owner_cannot_book_own_item() {
    let (app, owner, _, item) = setup().await;
    let start = tomorrow();

    let (status, body) = app.book(owner, item, start, start + Duration::days(1)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn test_invalid_booking_requests() {
    let (app, _, booker, item) = setup().await;
    let past = Utc::now() - Duration::days(1);

    let (status, body) = app.book(booker, item, past, past + Duration::days(3)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "Validation");

    let (status, body) = app.call(Method::POST, "/bookings", Some(booker), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");

    let (status, body) = app
        .call(Method::POST, "/bookings", None, Some(json!({ "itemId": item })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
}

#[tokio::test]
async fn test_stranger_cannot_see_or_approve() {
    let (app, _, booker, item) = setup().await;
    let stranger = app.create_user("Stranger").await;
    let start = tomorrow();
    let (_, body) = app.book(booker, item, start, start + Duration::days(1)).await;
    let id = body["id"].as_i64().unwrap();

    let (status, _) = app
        .call(Method::GET, &format!("/bookings/{}", id), Some(stranger), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call(Method::PATCH, &format!("/bookings/{}?approved=false", id), Some(booker), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_states_and_pages() {
    let (app, owner, booker, item) = setup().await;
    let start = tomorrow();
    for day in 0..3 {
        let (status, _) = app
            .book(
                booker,
                item,
                start + Duration::days(day * 2),
                start + Duration::days(day * 2 + 1),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app
        .call(Method::GET, "/bookings?state=FUTURE", Some(booker), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed[0]["start"].as_str() > listed[1]["start"].as_str());

    let (_, body) = app
        .call(Method::GET, "/bookings/owner?state=WAITING&from=1&size=1", Some(owner), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app
        .call(Method::GET, "/bookings/owner?from=10&size=5", Some(owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = app
        .call(Method::GET, "/bookings?state=UNSUPPORTED_STATUS", Some(booker), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "UnsupportedOperation");
    assert_eq!(body["error"], "Unknown state: UNSUPPORTED_STATUS");

    let (status, _) = app
        .call(Method::GET, "/bookings?size=0", Some(booker), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
