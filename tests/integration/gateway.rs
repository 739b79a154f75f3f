//! Gateway validation and forwarding

use axum::{
    http::{Method, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::json;
use tokio::net::TcpListener;

use shareit::{
    config::GatewayConfig,
    gateway::{self, client::ServerClient, GatewayState},
};

use crate::common::{send, tomorrow, TestApp};

fn gateway_for(server_url: String) -> Router {
    let config = GatewayConfig {
        server_url,
        timeout_secs: 5,
        ..Default::default()
    };
    let client = ServerClient::new(&config).unwrap();
    gateway::router(GatewayState { client })
}

/// Serve an in-memory server on a free local port
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = TestApp::new();
    tokio::spawn(async move {
        axum::serve(listener, app.router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// URL of a local port nothing listens on
async fn dead_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_forwards_and_relays_answers() {
    let gateway = gateway_for(spawn_server().await);

    let (status, body) = send(
        &gateway,
        Method::POST,
        "/users",
        None,
        Some(json!({ "name": "Ann", "email": "ann@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let ann = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &gateway,
        Method::POST,
        "/users",
        None,
        Some(json!({ "name": "Ann again", "email": "ann@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "Conflict");

    let (status, body) = send(
        &gateway,
        Method::POST,
        "/items",
        Some(ann),
        Some(json!({ "name": "Drill", "description": "Cordless", "available": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item = body["id"].as_i64().unwrap();

    let start = tomorrow();
    let (status, body) = send(
        &gateway,
        Method::POST,
        "/bookings",
        Some(ann),
        Some(json!({ "itemId": item, "start": start, "end": start + Duration::days(1) })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");

    let (status, body) = send(&gateway, Method::GET, "/bookings?state=PAST", Some(ann), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rejects_invalid_input_without_server() {
    let gateway = gateway_for(dead_server().await);

    let (status, body) = send(
        &gateway,
        Method::POST,
        "/users",
        None,
        Some(json!({ "name": "Ann", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "Validation");

    let past = Utc::now() - Duration::days(1);
    let (status, _) = send(
        &gateway,
        Method::POST,
        "/bookings",
        Some(1),
        Some(json!({ "itemId": 1, "start": past, "end": past + Duration::days(2) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&gateway, Method::GET, "/bookings?state=SOON", Some(1), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown state: SOON");

    let (status, _) = send(&gateway, Method::GET, "/requests/all?from=-1", Some(1), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&gateway, Method::GET, "/bookings", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unreachable_server_is_bad_gateway() {
    let gateway = gateway_for(dead_server().await);

    let (status, body) = send(&gateway, Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "Upstream");
}
