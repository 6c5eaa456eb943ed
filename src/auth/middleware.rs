// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Apply [`require_bearer`] to a router subtree to reject every request that
//! does not carry a verifiable `Authorization: Bearer <token>` header:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/products", get(list_products))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         verifier.clone(),
//!         require_bearer,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::{verifier::SharedVerifier, AuthError};

const BEARER_PREFIX: &str = "Bearer ";

/// Gate a route on a valid bearer token.
///
/// The verifier is consulted at most once. On success the verified
/// [`Principal`](super::Principal) is inserted into the request extensions
/// before the request is forwarded.
pub async fn require_bearer(
    State(verifier): State<SharedVerifier>,
    mut request: Request,
    next: Next,
) -> Response {
    let verified = match bearer_token(request.headers()) {
        Some(token) => verifier.verify_token(token),
        None => {
            debug!(path = %request.uri().path(), "rejecting request without bearer token");
            return AuthError::MissingToken.into_response();
        }
    };

    match verified {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => {
            debug!(
                path = %request.uri().path(),
                reason = e.error_code(),
                "rejecting request with invalid bearer token"
            );
            AuthError::InvalidToken.into_response()
        }
    }
}

/// Raw token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Principal, TokenCodec, TokenError, TokenVerifier};
    use crate::config::AuthConfig;
    use axum::{
        body::{to_bytes, Body},
        extract::Extension,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use chrono::{Duration, Utc};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tower::ServiceExt;

    /// Accepts exactly one token and counts every call.
    struct FakeVerifier {
        valid_token: &'static str,
        calls: AtomicUsize,
    }

    impl FakeVerifier {
        fn new(valid_token: &'static str) -> Arc<Self> {
            Arc::new(Self {
                valid_token,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl TokenVerifier for FakeVerifier {
        fn verify_token(&self, token: &str) -> Result<Principal, TokenError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if token == self.valid_token {
                Ok(Principal::new("testuser", i64::MAX))
            } else {
                Err(TokenError::InvalidSignature)
            }
        }
    }

    fn protected_app(verifier: SharedVerifier, hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/protected",
                get(move |Extension(principal): Extension<Principal>| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        (StatusCode::OK, principal.username)
                    }
                }),
            )
            .route_layer(from_fn_with_state(verifier, require_bearer))
    }

    fn request(auth: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn missing_header_never_reaches_verifier() {
        let verifier = FakeVerifier::new("valid-token");
        let hits = Arc::new(AtomicUsize::new(0));
        let app = protected_app(verifier.clone(), hits.clone());

        let response = app.oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, "Unauthorized - Missing Token");
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_missing_token() {
        let verifier = FakeVerifier::new("valid-token");
        let hits = Arc::new(AtomicUsize::new(0));

        for value in ["Basic dXNlcjpwYXNz", "bearer valid-token", "Bearervalid-token", ""] {
            let app = protected_app(verifier.clone(), hits.clone());
            let response = app.oneshot(request(Some(value))).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{value:?}");
            assert_eq!(body_string(response).await, "Unauthorized - Missing Token");
        }

        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_once() {
        let verifier = FakeVerifier::new("valid-token");
        let hits = Arc::new(AtomicUsize::new(0));
        let app = protected_app(verifier.clone(), hits.clone());

        let response = app
            .oneshot(request(Some("Bearer invalid-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(response).await.contains("invalid token"));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_token_is_forwarded_with_principal() {
        let verifier = FakeVerifier::new("valid-token");
        let hits = Arc::new(AtomicUsize::new(0));
        let app = protected_app(verifier.clone(), hits.clone());

        let response = app
            .oneshot(request(Some("Bearer valid-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "testuser");
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn downstream_status_passes_through() {
        let verifier: SharedVerifier = FakeVerifier::new("valid-token");
        let app = Router::new()
            .route("/protected", get(|| async { StatusCode::ACCEPTED }))
            .route_layer(from_fn_with_state(verifier, require_bearer));

        let response = app
            .oneshot(request(Some("Bearer valid-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn real_codec_rejects_expired_and_tampered_tokens() {
        let codec = Arc::new(TokenCodec::new(&AuthConfig::new("gate-secret")));
        let expired = codec
            .issue_at("alice", Utc::now() - Duration::hours(2) - Duration::seconds(5))
            .unwrap();
        let mut tampered = codec.issue("alice").unwrap();
        tampered.push('x');

        for token in [expired, tampered] {
            let hits = Arc::new(AtomicUsize::new(0));
            let app = protected_app(codec.clone(), hits.clone());
            let response = app
                .oneshot(request(Some(&format!("Bearer {token}"))))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(body_string(response).await.contains("invalid token"));
            assert_eq!(hits.load(Ordering::SeqCst), 0);
        }

        let valid = codec.issue("alice").unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let response = protected_app(codec.clone(), hits.clone())
            .oneshot(request(Some(&format!("Bearer {valid}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "alice");
    }
}
