//! Shared helpers: an in-memory server and a JSON request helper

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use shareit::{api, repository::Repository, AppConfig, AppState};

pub struct TestApp {
    pub router: Router,
    pub repository: Repository,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Repository::in_memory();
        let state = AppState::new(AppConfig::default(), repository.clone());
        Self {
            router: api::router(state),
            repository,
        }
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        user: Option<i64>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.router, method, uri, user, body).await
    }

    pub async fn create_user(&self, name: &str) -> i64 {
        let (status, body) = self
            .call(
                Method::POST,
                "/users",
                None,
                Some(json!({ "name": name, "email": format!("{}@example.com", name.to_lowercase()) })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn create_item(&self, owner: i64, name: &str) -> i64 {
        let (status, body) = self
            .call(
                Method::POST,
                "/items",
                Some(owner),
                Some(json!({ "name": name, "description": format!("A good {}", name), "available": true })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn book(
        &self,
        booker: i64,
        item: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> (StatusCode, Value) {
        self.call(
            Method::POST,
            "/bookings",
            Some(booker),
            Some(json!({ "itemId": item, "start": start, "end": end })),
        )
        .await
    }
}

/// Send a JSON request through a router and decode the JSON answer
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    user: Option<i64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("X-Sharer-User-Id", user.to_string());
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub fn tomorrow() -> DateTime<Utc> {
    Utc::now() + Duration::days(1)
}
