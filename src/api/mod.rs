// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Body,
    http::Request,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_bearer,
    models::{
        CreateProductRequest, CreateUserRequest, LoginRequest, LoginResponse, MessageResponse,
        Product, UpdateProductRequest, UpdateUserRequest, User,
    },
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod products;
pub mod users;

pub fn router(state: AppState) -> Router {
    let products = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route_layer(from_fn_with_state(state.verifier.clone(), require_bearer));

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/login", post(auth::login))
        .route("/users", get(users::list_users).post(users::register_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .merge(products)
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        auth::login,
        users::register_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        products::create_product,
        products::list_products,
        products::get_product,
        products::update_product,
        products::delete_product
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            MessageResponse,
            User,
            CreateUserRequest,
            UpdateUserRequest,
            Product,
            CreateProductRequest,
            UpdateProductRequest,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Auth", description = "Token issuance"),
        (name = "Users", description = "User accounts"),
        (name = "Products", description = "Product catalogue (bearer token required)")
    )
)]
struct ApiDoc;

/// Registers the `bearer` scheme referenced by the product routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::storage::AppDatabase;
    use axum::{
        body::to_bytes,
        http::{header, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app() -> (Router, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db = AppDatabase::open(&temp_dir.path().join("test.redb")).expect("open db");
        let state = AppState::new(db, &AuthConfig::new("router-secret"));
        (router(state), temp_dir)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn register_and_login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users",
                None,
                json!({
                    "name": "Alice",
                    "email": "alice@example.com",
                    "username": "alice",
                    "password": "correct-secret"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                json!({"username": "alice", "password": "correct-secret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        let token = body["token"].as_str().unwrap().to_string();
        assert!(!token.is_empty());
        token
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (app, _temp_dir) = test_app();
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn products_require_token() {
        let (app, _temp_dir) = test_app();

        let response = app.oneshot(get_request("/products", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "Unauthorized - Missing Token");
    }

    #[tokio::test]
    async fn products_reject_invalid_token() {
        let (app, _temp_dir) = test_app();

        let response = app
            .oneshot(get_request("/products", Some("not.a.token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "invalid token");
    }

    #[tokio::test]
    async fn login_then_manage_products() {
        let (app, _temp_dir) = test_app();
        let token = register_and_login(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/products",
                Some(&token),
                json!({"name": "Mouse", "price": 900.0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_text(response).await,
            r#"{"message":"Product created successfully"}"#
        );

        let response = app
            .clone()
            .oneshot(get_request("/products/1", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let product: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(product["name"], "Mouse");

        let response = app
            .oneshot(get_request("/products/abc", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn gate_uses_state_verifier() {
        struct RejectAll;

        impl crate::auth::TokenVerifier for RejectAll {
            fn verify_token(
                &self,
                _token: &str,
            ) -> Result<crate::auth::Principal, crate::auth::TokenError> {
                Err(crate::auth::TokenError::Malformed)
            }
        }

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db = AppDatabase::open(&temp_dir.path().join("test.redb")).expect("open db");
        let state = AppState::new(db, &AuthConfig::new("router-secret"));
        let token = state.tokens.issue("alice").unwrap();
        let app = router(state.with_verifier(std::sync::Arc::new(RejectAll)));

        let response = app
            .oneshot(get_request("/products", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "invalid token");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let (app, _temp_dir) = test_app();
        register_and_login(&app).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                json!({"username": "alice", "password": "wrong"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_text(response).await,
            r#"{"error":"invalid username or password"}"#
        );
    }

    #[tokio::test]
    async fn user_routes_are_not_gated() {
        let (app, _temp_dir) = test_app();

        let response = app.oneshot(get_request("/users", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (app, _temp_dir) = test_app();

        let response = app
            .oneshot(get_request("/health/live", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
