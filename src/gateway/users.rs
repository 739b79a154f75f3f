//! Gateway user routes

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
};
use validator::Validate;

use super::{client::Forward, parse_body, GatewayState};
use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser},
};

pub async fn list_users(State(state): State<GatewayState>) -> AppResult<Response> {
    state.forward(Forward::get("/users")).await
}

pub async fn get_user(State(state): State<GatewayState>, Path(id): Path<i64>) -> AppResult<Response> {
    state.forward(Forward::get(format!("/users/{}", id))).await
}

pub async fn create_user(State(state): State<GatewayState>, body: Bytes) -> AppResult<Response> {
    parse_body::<CreateUser>(&body)?.validate()?;
    state.forward(Forward::post("/users").body(body)).await
}

pub async fn update_user(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<Response> {
    parse_body::<UpdateUser>(&body)?.validate()?;
    state
        .forward(Forward::patch(format!("/users/{}", id)).body(body))
        .await
}

pub async fn delete_user(State(state): State<GatewayState>, Path(id): Path<i64>) -> AppResult<Response> {
    state.forward(Forward::delete(format!("/users/{}", id))).await
}
