// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Product endpoints. Mounted behind [`require_bearer`](crate::auth::require_bearer),
//! which places the verified [`Principal`] in the request extensions.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};

use crate::{
    auth::Principal,
    error::ApiError,
    models::{CreateProductRequest, MessageResponse, Product, UpdateProductRequest},
    services::ProductService,
    state::AppState,
};

fn product_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request("Invalid product ID"))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Product created", body = MessageResponse),
        (status = 400, description = "Invalid name or price"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::bad_request("Invalid request"))?;

    ProductService::new(&state.db).create(&principal, request)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Product created successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Product]),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(ProductService::new(&state.db).list()?))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = u64, Path, description = "Product id")),
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Product),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = product_id(path)?;
    Ok(Json(ProductService::new(&state.db).get(id)?))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = u64, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Merged product is incomplete"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = product_id(path)?;
    let Json(request) = payload.map_err(|_| ApiError::bad_request("Invalid request"))?;

    ProductService::new(&state.db).update(&principal, id, request)?;
    Ok(Json(MessageResponse::new("Product updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = u64, Path, description = "Product id")),
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = product_id(path)?;
    ProductService::new(&state.db).delete(&principal, id)?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::storage::AppDatabase;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db = AppDatabase::open(&temp_dir.path().join("test.redb")).expect("open db");
        (AppState::new(db, &AuthConfig::new("products-secret")), temp_dir)
    }

    fn principal() -> Extension<Principal> {
        Extension(Principal::new("alice", 0))
    }

    #[tokio::test]
    async fn create_product_success() {
        let (state, _temp_dir) = test_state();
        let request = CreateProductRequest {
            name: "Mouse".into(),
            price: 900.0,
        };

        let (status, Json(body)) =
            create_product(State(state.clone()), principal(), Ok(Json(request)))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.message, "Product created successfully");

        let Json(product) = get_product(State(state), Ok(Path(1))).await.unwrap();
        assert_eq!(product.name, "Mouse");
        assert_eq!(product.price, 900.0);
    }

    #[tokio::test]
    async fn create_product_with_zero_price() {
        let (state, _temp_dir) = test_state();
        let request = CreateProductRequest {
            name: "Mouse".into(),
            price: 0.0,
        };

        let err = create_product(State(state), principal(), Ok(Json(request)))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "product price must be greater than zero");
    }

    #[tokio::test]
    async fn update_and_delete_product() {
        let (state, _temp_dir) = test_state();
        create_product(
            State(state.clone()),
            principal(),
            Ok(Json(CreateProductRequest {
                name: "Mouse".into(),
                price: 900.0,
            })),
        )
        .await
        .unwrap();

        let request = UpdateProductRequest {
            name: None,
            price: Some(750.0),
        };
        update_product(State(state.clone()), principal(), Ok(Path(1)), Ok(Json(request)))
            .await
            .unwrap();

        let Json(products) = list_products(State(state.clone())).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, 750.0);

        let Json(body) = delete_product(State(state.clone()), principal(), Ok(Path(1)))
            .await
            .unwrap();
        assert_eq!(body.message, "Product deleted successfully");

        let err = delete_product(State(state), principal(), Ok(Path(1)))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "product with id 1 not found");
    }
}
