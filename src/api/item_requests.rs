//! Item request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        item_request::{ItemRequestDetails, ItemRequestInput},
        PageQuery,
    },
    AppState,
};

use super::SharerUserId;

/// Post a new item request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester")
    ),
    request_body = ItemRequestInput,
    responses(
        (status = 201, description = "Request created", body = ItemRequestDetails),
        (status = 400, description = "Blank description", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(input): Json<ItemRequestInput>,
) -> AppResult<(StatusCode, Json<ItemRequestDetails>)> {
    let created = state.services.requests.create_request(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// The caller's own requests, newest first
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester")
    ),
    responses(
        (status = 200, description = "Own requests", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_own_requests(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.list_own(user_id).await?;
    Ok(Json(requests))
}

/// Requests made by other users, newest first
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<ItemRequestDetails>),
        (status = 400, description = "Invalid page", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_other_requests(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let page = query.page()?;
    let requests = state.services.requests.list_others(user_id, page).await?;
    Ok(Json(requests))
}

/// Get a request with the items answering it
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user"),
        ("id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request details", body = ItemRequestDetails),
        (status = 404, description = "User or request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Json<ItemRequestDetails>> {
    let request = state.services.requests.get_request(user_id, id).await?;
    Ok(Json(request))
}

/// Change the description of an own request
#[utoipa::path(
    patch,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester"),
        ("id" = i64, Path, description = "Request ID")
    ),
    request_body = ItemRequestInput,
    responses(
        (status = 200, description = "Request updated", body = ItemRequestDetails),
        (status = 403, description = "Caller did not create the request", body = crate::error::ErrorResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_request(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    Json(input): Json<ItemRequestInput>,
) -> AppResult<Json<ItemRequestDetails>> {
    let updated = state.services.requests.update_request(user_id, id, input).await?;
    Ok(Json(updated))
}
