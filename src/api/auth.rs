// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    error::ApiError,
    models::{LoginRequest, LoginResponse},
    services::UserService,
    state::AppState,
};

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Invalid username or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::bad_request("Invalid request"))?;

    let token = UserService::new(&state.db, &state.tokens)
        .login(&request.username, &request.password)?;
    Ok(Json(LoginResponse { token }))
}
