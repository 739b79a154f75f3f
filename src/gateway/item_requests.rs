//! Gateway item request routes

use axum::{
    body::Bytes,
    extract::{Path, Query, RawQuery, State},
    response::Response,
};
use validator::Validate;

use super::{client::Forward, parse_body, GatewayState};
use crate::{
    api::SharerUserId,
    error::AppResult,
    models::{item_request::ItemRequestInput, PageQuery},
};

pub async fn create_request(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    body: Bytes,
) -> AppResult<Response> {
    parse_body::<ItemRequestInput>(&body)?.validate()?;
    state
        .forward(Forward::post("/requests").user(user_id).body(body))
        .await
}

pub async fn list_own_requests(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Response> {
    state.forward(Forward::get("/requests").user(user_id)).await
}

pub async fn list_other_requests(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Query(page): Query<PageQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    page.page()?;
    state
        .forward(Forward::get("/requests/all").user(user_id).query(query))
        .await
}

pub async fn get_request(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    state
        .forward(Forward::get(format!("/requests/{}", id)).user(user_id))
        .await
}

pub async fn update_request(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<Response> {
    parse_body::<ItemRequestInput>(&body)?.validate()?;
    state
        .forward(Forward::patch(format!("/requests/{}", id)).user(user_id).body(body))
        .await
}
