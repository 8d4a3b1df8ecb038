//! User-with-books endpoints

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::{
    error::AppResult,
    models::{UserBookRequest, UserBookResponse},
};

use super::REQUEST_ID_HEADER;

/// Create a user together with its books
#[utoipa::path(
    post,
    path = "/user",
    tag = "users",
    params(
        ("rqid" = Option<String>, Header, description = "Request id")
    ),
    request_body = UserBookRequest,
    responses(
        (status = 201, description = "User and books created", body = UserBookResponse),
        (status = 400, description = "Invalid or incomplete request", body = crate::error::ErrorResponse),
        (status = 422, description = "Body is not a well-formed request"),
        (status = 409, description = "Store constraint violated", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user_with_books(
    State(state): State<crate::AppState>,
    headers: HeaderMap,
    Json(request): Json<UserBookRequest>,
) -> AppResult<(StatusCode, Json<UserBookResponse>)> {
    let rqid = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");
    tracing::info!(rqid, "Create user with books request");

    let response = state.services.user_books.create_user_with_books(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Update a user and attach new books to it
#[utoipa::path(
    put,
    path = "/user/{user_id}",
    tag = "users",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    request_body = UserBookRequest,
    responses(
        (status = 200, description = "User updated, all owned book ids", body = UserBookResponse),
        (status = 400, description = "Invalid or incomplete request", body = crate::error::ErrorResponse),
        (status = 422, description = "Body is not a well-formed request"),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_user_with_books(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UserBookRequest>,
) -> AppResult<Json<UserBookResponse>> {
    let response = state
        .services
        .user_books
        .update_user_with_books(request, user_id)
        .await?;
    Ok(Json(response))
}

/// Get a user with its book ids
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = "users",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User with book ids", body = UserBookResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user_with_books(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<UserBookResponse>> {
    let response = state.services.user_books.get_user_with_books(user_id).await?;
    Ok(Json(response))
}

/// List every user with its book ids
#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    responses(
        (status = 200, description = "All users with book ids", body = Vec<UserBookResponse>)
    )
)]
pub async fn get_all_users_with_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<UserBookResponse>>> {
    let response = state.services.user_books.get_all().await?;
    Ok(Json(response))
}

/// Delete a user and all of its books
#[utoipa::path(
    delete,
    path = "/user/{user_id}",
    tag = "users",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User and books deleted"),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user_with_books(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.user_books.delete_user_with_books(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
