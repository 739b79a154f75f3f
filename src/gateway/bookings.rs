//! Gateway booking routes

use axum::{
    body::Bytes,
    extract::{Path, Query, RawQuery, State},
    response::Response,
};
use chrono::{DateTime, Utc};
use validator::Validate;

use super::{client::Forward, parse_body, GatewayState};
use crate::{
    api::SharerUserId,
    error::{AppError, AppResult},
    models::booking::{ApprovalQuery, BookingListQuery, CreateBooking},
    services::bookings::validate_period,
};

/// Reject a booking request the server would refuse on its dates alone
fn check_booking(booking: &CreateBooking, now: DateTime<Utc>) -> AppResult<()> {
    booking.validate()?;
    validate_period(booking.start, booking.end, now)?;
    Ok(())
}

pub async fn create_booking(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    body: Bytes,
) -> AppResult<Response> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Missing booking info".to_string()));
    }
    check_booking(&parse_body::<CreateBooking>(&body)?, Utc::now())?;

    state
        .forward(Forward::post("/bookings").user(user_id).body(body))
        .await
}

pub async fn update_booking_status(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    Query(_approval): Query<ApprovalQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    state
        .forward(
            Forward::patch(format!("/bookings/{}", id))
                .user(user_id)
                .query(query),
        )
        .await
}

pub async fn get_booking(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    state
        .forward(Forward::get(format!("/bookings/{}", id)).user(user_id))
        .await
}

pub async fn list_booker_bookings(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Query(listing): Query<BookingListQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    listing.state()?;
    listing.page()?;
    state
        .forward(Forward::get("/bookings").user(user_id).query(query))
        .await
}

pub async fn list_owner_bookings(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Query(listing): Query<BookingListQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    listing.state()?;
    listing.page()?;
    state
        .forward(Forward::get("/bookings/owner").user(user_id).query(query))
        .await
}
