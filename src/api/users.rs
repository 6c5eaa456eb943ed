// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User account endpoints. These routes are not behind the bearer gate.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    models::{CreateUserRequest, MessageResponse, UpdateUserRequest, User},
    services::UserService,
    state::AppState,
};

fn user_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request("Invalid user ID"))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    tag = "Users",
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing fields or malformed body"),
        (status = 409, description = "Username already registered"),
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::bad_request("Invalid request"))?;

    UserService::new(&state.db, &state.tokens).register(request)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses((status = 200, body = [User]))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(UserService::new(&state.db, &state.tokens).list()?))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    tag = "Users",
    responses(
        (status = 200, body = User),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let id = user_id(path)?;
    Ok(Json(UserService::new(&state.db, &state.tokens).get(id)?))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    tag = "Users",
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Missing fields or malformed body"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already registered"),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = user_id(path)?;
    let Json(request) = payload.map_err(|_| ApiError::bad_request("Invalid request"))?;

    UserService::new(&state.db, &state.tokens).update(id, request)?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    tag = "Users",
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "User not found"),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = user_id(path)?;
    UserService::new(&state.db, &state.tokens).delete(id)?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
