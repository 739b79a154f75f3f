//! Validating gateway in front of the ShareIt server
//!
//! Mirrors every server route. Each handler rejects malformed input itself
//! and forwards everything else untouched, relaying the server's answer.

pub mod bookings;
pub mod client;
pub mod item_requests;
pub mod items;
pub mod users;

use axum::{
    body::Bytes,
    response::Response,
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, AppResult};
use client::{Forward, ServerClient};

/// State shared by the gateway handlers
#[derive(Clone)]
pub struct GatewayState {
    pub client: ServerClient,
}

impl GatewayState {
    pub async fn forward(&self, call: Forward) -> AppResult<Response> {
        self.client.forward(call).await
    }
}

/// Decode a JSON body for validation; the raw bytes are what gets forwarded
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> AppResult<T> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Missing request body".to_string()));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
}

/// Create the gateway router
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(crate::api::health::health_check))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Items
        .route("/items", get(items::list_owner_items).post(items::create_item))
        .route("/items/search", get(items::search_items))
        .route("/items/:id", get(items::get_item).patch(items::update_item))
        .route("/items/:id/comment", post(items::add_comment))
        // Item requests
        .route(
            "/requests",
            get(item_requests::list_own_requests).post(item_requests::create_request),
        )
        .route("/requests/all", get(item_requests::list_other_requests))
        .route(
            "/requests/:id",
            get(item_requests::get_request).patch(item_requests::update_request),
        )
        // Bookings
        .route(
            "/bookings",
            get(bookings::list_booker_bookings).post(bookings::create_booking),
        )
        .route("/bookings/owner", get(bookings::list_owner_bookings))
        .route(
            "/bookings/:id",
            get(bookings::get_booking).patch(bookings::update_booking_status),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::CreateUser;

    #[test]
    fn test_parse_body() {
        let user: CreateUser =
            parse_body(&Bytes::from_static(br#"{"name":"Ann","email":"ann@example.com"}"#)).unwrap();
        assert_eq!(user.name, "Ann");

        let err = parse_body::<CreateUser>(&Bytes::new()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = parse_body::<CreateUser>(&Bytes::from_static(b"{not json")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
