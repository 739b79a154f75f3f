//! Gateway item and comment routes

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
    models::{
        comment::CreateComment,
        item::{CreateItem, ItemSearchQuery, UpdateItem},
        Page, PageQuery,
    },
};

pub async fn list_owner_items(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Query(page): Query<PageQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    page.page()?;
    state
        .forward(Forward::get("/items").user(user_id).query(query))
        .await
}

pub async fn search_items(
    State(state): State<GatewayState>,
    Query(search): Query<ItemSearchQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    Page::new(search.from, search.size)?;
    state
        .forward(Forward::get("/items/search").query(query))
        .await
}

pub async fn get_item(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    state
        .forward(Forward::get(format!("/items/{}", id)).user(user_id))
        .await
}

pub async fn create_item(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    body: Bytes,
) -> AppResult<Response> {
    parse_body::<CreateItem>(&body)?.validate()?;
    state
        .forward(Forward::post("/items").user(user_id).body(body))
        .await
}

pub async fn update_item(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<Response> {
    parse_body::<UpdateItem>(&body)?.validate()?;
    state
        .forward(Forward::patch(format!("/items/{}", id)).user(user_id).body(body))
        .await
}

pub async fn add_comment(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<Response> {
    parse_body::<CreateComment>(&body)?.validate()?;
    state
        .forward(
            Forward::post(format!("/items/{}/comment", id))
                .user(user_id)
                .body(body),
        )
        .await
}
